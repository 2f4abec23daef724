use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memento_core::{Field, Record};
use memento_prompt::{PromptInput, RenderMode, Renderer};
use rand::Rng;

fn generate(fields: usize, repeats: usize) -> (Record, PromptInput) {
    let mut rng = rand::thread_rng();
    let mut prompt = String::new();
    let mut record = Record::new("Bench", "");
    let mut input = PromptInput::new();
    for i in 0..fields {
        record.fields.push(Field::new(format!("f{i}")));
        if rng.gen_bool(0.7) {
            input.set(format!("f{i}"), format!("value {}", rng.gen_range(0..1000)));
        }
    }
    for r in 0..repeats {
        prompt.push_str(&format!("Step {r}: use {{{{ f{} }}}} and continue. ", r % fields));
    }
    record.prompt = prompt;
    (record, input.with_addendum("extra context"))
}

fn bench_render(c: &mut Criterion) {
    let renderer = Renderer::default();
    for &(name, repeats) in &[("short", 10), ("long", 500)] {
        let (record, input) = generate(10, repeats);
        c.bench_function(&format!("render_final_{name}"), |b| {
            b.iter(|| black_box(renderer.render(black_box(&record), &input, RenderMode::Final)))
        });
        c.bench_function(&format!("render_preview_{name}"), |b| {
            b.iter(|| black_box(renderer.render(black_box(&record), &input, RenderMode::Preview)))
        });
    }
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
