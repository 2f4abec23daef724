//! Legacy long-form sheets.
//!
//! The first generation wrote French keys (`titre`, `variables`,
//! `nom`, `obligatoire`, ...); a later one kept English record keys but
//! still named field labels `name`. Both normalize into [`Record`].

use memento_core::placeholder::is_valid_id;
use memento_core::{flag, Confidence, Field, FieldKind, Record};
use serde::Deserialize;

use crate::alias::AliasGroups;

/// Field keys that only legacy sheets use.
pub const LEGACY_FIELD_KEYS: &[&str] = &["nom", "name", "placeholder", "obligatoire"];

/// Record title keys, current first.
pub const TITLE_KEYS: &[&str] = &["title", "titre"];

pub const RECORD_ALIASES: AliasGroups = &[
    &["titre", "title"],
    &["categorie", "category"],
    &["objectif", "objective"],
    &["concepteur", "designer", "auteur"],
    &["mise_a_jour", "lastUpdated", "date"],
    &["variables", "fields"],
];

pub const FIELD_ALIASES: AliasGroups = &[
    &["nom", "name", "label"],
    &["kind", "type"],
    &["obligatoire", "required"],
    &["placeholder", "hint"],
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyRecord {
    #[serde(default, alias = "title")]
    pub titre: Option<String>,
    #[serde(default, alias = "category")]
    pub categorie: Option<String>,
    #[serde(default, alias = "objective")]
    pub objectif: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default, alias = "designer", alias = "auteur")]
    pub concepteur: Option<String>,
    #[serde(default, alias = "lastUpdated", alias = "date")]
    pub mise_a_jour: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, alias = "fields")]
    pub variables: Vec<LegacyField>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "name", alias = "label")]
    pub nom: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "required", deserialize_with = "flag::deserialize")]
    pub obligatoire: bool,
    #[serde(default, alias = "hint")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Placeholder-safe id derived from a label: `Code ONU` → `code_onu`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.trim().chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

/// Id for a field that arrived without one. A label that is already a
/// valid placeholder id is used as is, since prompts reference it
/// verbatim (`{{Lieu}}`); anything else is slugified.
pub fn derive_id(label: &str) -> Option<String> {
    let label = label.trim();
    if is_valid_id(label) {
        return Some(label.to_string());
    }
    Some(slugify(label)).filter(|s| !s.is_empty())
}

impl LegacyField {
    fn normalize(self, position: usize) -> Field {
        let label = non_blank(self.nom);
        let id = non_blank(self.id)
            .or_else(|| label.as_deref().and_then(derive_id))
            .unwrap_or_else(|| format!("var_{position}"));
        Field {
            id,
            label,
            kind: self.kind.as_deref().map(FieldKind::parse_lenient).unwrap_or_default(),
            required: self.obligatoire,
            hint: non_blank(self.placeholder),
            options: self.options,
        }
    }
}

impl LegacyRecord {
    pub fn normalize(self) -> Record {
        Record {
            title: self.titre.unwrap_or_default(),
            category: non_blank(self.categorie),
            objective: non_blank(self.objectif),
            references: non_blank(self.references),
            designer: non_blank(self.concepteur),
            last_updated: non_blank(self.mise_a_jour),
            version: non_blank(self.version),
            prompt: self.prompt.unwrap_or_default(),
            fields: self
                .variables
                .into_iter()
                .enumerate()
                .map(|(index, field)| field.normalize(index + 1))
                .collect(),
            confidence: self.confidence,
        }
    }
}
