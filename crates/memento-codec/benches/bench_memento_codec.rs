use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memento_codec::{compact, expand, Codec, SizingPolicy};
use memento_core::{Field, FieldKind, Record};
use rand::Rng;

const WORDS: &[&str] = &[
    "périmètre", "sécurité", "produit", "fuite", "vent", "victimes", "engins", "zone",
    "exclusion", "conseiller", "technique", "risque", "chimique", "mesures", "toxicité",
];

fn generate_record(prompt_words: usize, fields: usize) -> Record {
    let mut rng = rand::thread_rng();
    let mut prompt = String::new();
    for i in 0..prompt_words {
        if i % 40 == 0 && i / 40 < fields {
            prompt.push_str(&format!("{{{{f{}}}}} ", i / 40));
        }
        prompt.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        prompt.push(' ');
    }
    let mut record = Record::new("Bench sheet", prompt);
    record.objective = Some("Measure encode and decode cost".into());
    for i in 0..fields {
        let kind = if i % 3 == 0 { FieldKind::Textarea } else { FieldKind::Text };
        record.fields.push(Field::new(format!("f{i}")).with_label(format!("Field {i}")).with_kind(kind));
    }
    record
}

fn bench_encode(c: &mut Criterion) {
    let codec = Codec::default();
    for &(name, words) in &[("small", 50), ("medium", 300), ("large", 900)] {
        let record = generate_record(words, 10);
        c.bench_function(&format!("encode_{name}"), |b| {
            b.iter(|| black_box(codec.encode(black_box(&record)).unwrap()))
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    let codec = Codec::default();
    let record = generate_record(300, 10);
    let payload = codec.encode(&record).unwrap().payload;
    c.bench_function("decode_envelope", |b| {
        b.iter(|| black_box(codec.decode(black_box(&payload)).unwrap()))
    });
    let long = serde_json::to_string(&record).unwrap();
    c.bench_function("decode_current", |b| {
        b.iter(|| black_box(codec.decode(black_box(&long)).unwrap()))
    });
}

fn bench_compact(c: &mut Criterion) {
    let record = generate_record(300, 10);
    c.bench_function("compact_expand", |b| {
        b.iter(|| black_box(expand(&compact(black_box(&record)))))
    });
    let policy = SizingPolicy::default();
    c.bench_function("render_size", |b| {
        b.iter(|| black_box(policy.render_size(black_box(1800))))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_compact);
criterion_main!(benches);
