use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lyrics_maker::song::{
    Creativity, Genre, Purpose, UserSelection, clean_ai_response, refine_prompt,
};

fn bench_refine_prompt(c: &mut Criterion) {
    let selection = UserSelection {
        genre: Genre::Rock,
        writer_style: "Bob Dylan".to_string(),
        theme: "rain on a tin roof".to_string(),
        purpose: Purpose::Heartfelt,
        creativity: Creativity::default(),
    };

    c.bench_function("refine_prompt", |b| {
        b.iter(|| black_box(refine_prompt(black_box(&selection))));
    });
}

fn bench_clean_ai_response(c: &mut Criterion) {
    let verse = "The rain keeps drumming on the roof tonight\n".repeat(40);
    let completion = format!("```json\n{verse}```\n");

    c.bench_function("clean_ai_response", |b| {
        b.iter(|| black_box(clean_ai_response(black_box(&completion))));
    });
}

criterion_group!(benches, bench_refine_prompt, bench_clean_ai_response);
criterion_main!(benches);
