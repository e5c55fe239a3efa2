//! Benchmarks for the tokenizer.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mica_core::parse;

/// Generate a flat document mixing all bundled constructs.
fn generate_document(count: usize) -> String {
    let mut doc = String::new();
    for i in 0..count {
        doc.push_str(&format!("## Item {}\n\n", i));
        doc.push_str(&format!("This is the content for item number {}.\n\n", i));
        doc.push_str(&format!("    let value = {};\n    value + 1\n\n", i));
    }
    doc
}

fn bench_tokenize_document(c: &mut Criterion) {
    let input = generate_document(200);

    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("mixed_document", |b| {
        b.iter(|| parse(black_box(&input)).events.len())
    });

    group.finish();
}

/// Baseline measurements for single-construct inputs.
fn bench_tokenize_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_simple");

    group.bench_function("empty", |b| b.iter(|| parse(black_box("")).events.len()));

    let headings: String = (0..100).map(|i| format!("### Heading {}\n", i)).collect();
    group.throughput(Throughput::Bytes(headings.len() as u64));
    group.bench_function("headings_only", |b| {
        b.iter(|| parse(black_box(&headings)).events.len())
    });

    let code: String = (0..100).map(|i| format!("    line {}\n", i)).collect();
    group.throughput(Throughput::Bytes(code.len() as u64));
    group.bench_function("code_block", |b| {
        b.iter(|| parse(black_box(&code)).events.len())
    });

    let text: String = (0..100).map(|i| format!("plain prose line {}\n", i)).collect();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("text_only", |b| {
        b.iter(|| parse(black_box(&text)).events.len())
    });

    // Worst case for speculation: every line triggers a construct that
    // fails back to data.
    let near_misses: String = (0..100).map(|i| format!("#almost a heading {}\n", i)).collect();
    group.throughput(Throughput::Bytes(near_misses.len() as u64));
    group.bench_function("failed_triggers", |b| {
        b.iter(|| parse(black_box(&near_misses)).events.len())
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize_document, bench_tokenize_simple);
criterion_main!(benches);
