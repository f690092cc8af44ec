//! Benchmarks for slide rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use podium_renderer::MarkdownRenderer;

/// Generate a slide deck worth of markdown with `sections` headings.
fn generate_markdown(sections: usize) -> String {
    let mut md = String::with_capacity(sections * 300);
    md.push_str("# Deck\n\n");
    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str("Some **bold** and *italic* text with `code`.\n\n");
        md.push_str("| Name | Value |\n|:-----|------:|\n| a | 1 |\n| b | 2 |\n\n");
        md.push_str("- [x] done\n- [ ] open\n\n");
        md.push_str(&format!(">Quote number {i}\n> continued~Speaker {i}\n\n"));
    }
    md
}

fn bench_render_simple(c: &mut Criterion) {
    let renderer = MarkdownRenderer::new();
    c.bench_function("render_simple_markdown", |b| {
        b.iter(|| renderer.render_markdown("# Hello\n\nSimple content."));
    });
}

fn bench_render_sizes(c: &mut Criterion) {
    let renderer = MarkdownRenderer::new();
    let mut group = c.benchmark_group("render_by_size");

    for sections in [1, 10, 50] {
        let markdown = generate_markdown(sections);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &markdown,
            |b, markdown| {
                b.iter(|| renderer.render_markdown(markdown));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render_simple, bench_render_sizes);
criterion_main!(benches);
