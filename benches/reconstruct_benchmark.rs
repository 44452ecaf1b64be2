//! Benchmarks for text block replay and reading-order reconstruction.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic text blocks laid out like a body-text page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glyphline::{
    extract_page_text, ExportOptions, Exporter, FontDefinition, FontTable, JsonSource,
    LayoutOptions, PageData, PageRender,
};

fn font() -> FontDefinition {
    FontDefinition::new("F1", 32, 126, vec![0.5; 95])
}

/// Creates `lines` text blocks, each a line of two kerned runs.
fn create_blocks(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| {
            format!(
                "BT /F1 10 Tf 1 0 0 1 72 {} Tm 12 TL [(Line {} of the benchmark) -250 (page content.)] TJ (next) ' ET",
                760 - (i % 60) * 12,
                i
            )
        })
        .collect()
}

/// Benchmark replaying text blocks without reconstruction.
fn bench_block_replay(c: &mut Criterion) {
    let fonts = FontTable::new().with_font(font());
    let blocks = create_blocks(60);

    c.bench_function("replay_60_blocks", |b| {
        b.iter(|| {
            let mut page = PageRender::new(1, &fonts);
            for block in &blocks {
                page.add_text_block(black_box(block)).unwrap();
            }
            page.show_ops().len()
        });
    });
}

/// Benchmark full page text extraction at various sizes.
fn bench_page_text(c: &mut Criterion) {
    let fonts = FontTable::new().with_font(font());
    let options = LayoutOptions::default();
    let mut group = c.benchmark_group("page_text");

    for lines in [10, 60, 240].iter() {
        let blocks = create_blocks(*lines);

        group.bench_function(format!("{}_lines", lines), |b| {
            b.iter(|| extract_page_text(1, black_box(&blocks), &fonts, &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark multi-page export, parallel and sequential.
fn bench_export(c: &mut Criterion) {
    let pages: Vec<PageData> = (0..50)
        .map(|_| PageData::new(create_blocks(60), vec![font()]))
        .collect();
    let mut group = c.benchmark_group("export_50_pages");

    group.bench_function("parallel", |b| {
        let exporter = Exporter::new(JsonSource::new(pages.clone()));
        b.iter(|| exporter.export_to_string().unwrap());
    });

    group.bench_function("sequential", |b| {
        let exporter = Exporter::with_options(
            JsonSource::new(pages.clone()),
            ExportOptions::new().sequential(),
        );
        b.iter(|| exporter.export_to_string().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_block_replay, bench_page_text, bench_export);
criterion_main!(benches);
