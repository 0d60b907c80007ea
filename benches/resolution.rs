//! Benchmarks for label resolution and merging.
//!
//! Resolution is dominated by the fuzzy fallback, which scores the label
//! against every key in the index; merging by rebuilding blocks into the
//! master's XML tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use doc_composer::document::{Block, Paragraph, StyleTable, WordPackage};
use doc_composer::library::{similarity, LibraryIndex};
use doc_composer::merge::MergeEngine;
use doc_composer::normalize::normalize;

const TOPICS: &[&str] = &[
    "summary", "overview", "analysis", "results", "appendix", "risks", "outlook", "methodology",
];

/// An index with `size` documents named like report sections.
fn create_index(size: usize) -> LibraryIndex {
    LibraryIndex::from_files((0..size).map(|i| {
        let stem = format!("{} {} part {}", TOPICS[i % TOPICS.len()], i / TOPICS.len(), i);
        let path = PathBuf::from(format!("library/{stem}.xml"));
        (stem, path)
    }))
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_label", |b| {
        b.iter(|| normalize(black_box("  - Executive Summary (Q4 2024) __ Final  ")))
    });
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("similarity_ratio", |b| {
        b.iter(|| similarity::ratio(black_box("exec-summary-q4"), black_box("executive-summary-q4")))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for size in [10, 100, 1000] {
        let index = create_index(size);
        group.bench_with_input(BenchmarkId::new("exact", size), &index, |b, index| {
            b.iter(|| index.resolve(black_box("Summary 0 part 0"), 0.6))
        });
        group.bench_with_input(BenchmarkId::new("fuzzy", size), &index, |b, index| {
            b.iter(|| index.resolve(black_box("Sumary 0 prt 0"), 0.6))
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let blocks: Vec<Block> = (0..200)
        .map(|i| Block::Paragraph(Paragraph::with_text(format!("Paragraph {i}"))))
        .collect();
    let source = WordPackage::from_blocks(&blocks, &StyleTable::new()).unwrap();

    c.bench_function("merge_200_paragraphs", |b| {
        b.iter(|| {
            let master = WordPackage::blank(&StyleTable::new()).unwrap();
            let mut engine = MergeEngine::new(master);
            engine.merge(black_box(&source), "bench").unwrap();
            engine.finish()
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_similarity,
    bench_resolve,
    bench_merge
);
criterion_main!(benches);
