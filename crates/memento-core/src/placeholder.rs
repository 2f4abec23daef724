//! `{{id}}` placeholders in prompt templates.

use regex::Regex;
use std::sync::LazyLock;

/// `{{` identifier `}}`, whitespace tolerated inside the braces.
pub static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9._-]+)\s*\}\}").unwrap());

/// Placeholder ids in order of first appearance, without duplicates.
pub fn placeholder_ids(template: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let id = &caps[1];
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}
