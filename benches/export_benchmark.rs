//! Benchmarks for puremark export performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the export pipeline on synthetic markdown.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use puremark::{ExportOptions, LayoutOptions};

/// Creates synthetic markdown with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut content = String::new();

    for i in 0..sections {
        content.push_str(&format!("# Section {}\n\n", i + 1));
        content.push_str(
            "Benchmark paragraph with enough words to wrap across several lines \
             of the page so the measuring and breaking code gets exercised.\n\n",
        );
        content.push_str(&format!("## Details {}\n\n", i + 1));
        content.push_str("- first item\n- second item\n- third item\n\n");
        content.push_str("```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n\n");
    }

    content
}

/// Benchmark markdown tokenizing.
fn bench_tokenize(c: &mut Criterion) {
    let markdown = create_test_markdown(50);

    c.bench_function("tokenize_50_sections", |b| {
        b.iter(|| puremark::tokenize(black_box(&markdown)));
    });
}

/// Benchmark layout at various sizes.
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for sections in [10, 50, 200].iter() {
        let markdown = create_test_markdown(*sections);
        let options = ExportOptions::default();

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| puremark::build(black_box(&markdown), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full PDF export.
fn bench_pdf_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_export");
    let markdown = create_test_markdown(50);

    for compress in [true, false] {
        let options = ExportOptions::default()
            .with_layout_options(LayoutOptions::default())
            .with_compression(compress);

        let name = if compress { "compressed" } else { "uncompressed" };
        group.bench_function(name, |b| {
            b.iter(|| puremark::export_pdf_with_options(black_box(&markdown), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_layout, bench_pdf_export);
criterion_main!(benches);
