//! Criterion benchmarks for catalog load and search.
//!
//! Sizes are chosen so one iteration stays well under a second on a laptop;
//! the real master extract is several million items.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use publog::catalog::{CatalogIndex, CatalogService, tokenize};
use publog::config::DataConfig;
use publog::test_utils::fixtures::{UnitTestFixture, sample_index, synthetic_items};

// =============================================================================
// Tokenizer
// =============================================================================

fn tokenizer_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let text = "CAMERA, TELEVISION (AN/TVS-5) NIGHT VISION; HEXAGON-HEAD CAP SCREW";
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("item_name", |b| b.iter(|| tokenize(black_box(text))));
    group.finish();
}

// =============================================================================
// Load
// =============================================================================

fn load_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for size in [1_000usize, 10_000] {
        let items = synthetic_items(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("load_items", size), &items, |b, items| {
            b.iter(|| {
                let index = CatalogIndex::new();
                index.load_items(items.clone())
            });
        });
    }

    let fixture = UnitTestFixture::with_sample_catalog();
    let config = DataConfig::default();
    group.bench_function("load_directory_sample", |b| {
        b.iter(|| {
            let service = CatalogService::new();
            service.load_directory(black_box(&fixture.data_path), &config)
        });
    });
    group.finish();
}

// =============================================================================
// Search
// =============================================================================

fn search_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let index = CatalogIndex::new();
    index.load_items(synthetic_items(50_000));
    group.bench_function("name_and_two_words", |b| {
        b.iter(|| index.search_by_name(black_box("night vision")));
    });
    group.bench_function("name_single_word", |b| {
        b.iter(|| index.search_by_name(black_box("camera")));
    });
    group.bench_function("nsn_exact", |b| {
        b.iter(|| index.search_by_nsn(black_box("5820-00-001-2345")));
    });

    let sample = CatalogService::with_index(std::sync::Arc::new(sample_index()));
    group.bench_function("universal_part_number", |b| {
        b.iter(|| sample.search(black_box("A3256371")));
    });
    group.bench_function("manufacturer_or", |b| {
        b.iter(|| sample.search_manufacturer(black_box("night standards")));
    });
    group.finish();
}

criterion_group!(
    benches,
    tokenizer_benchmarks,
    load_benchmarks,
    search_benchmarks
);
criterion_main!(benches);
