use std::sync::Arc;
use std::thread;

use publog::catalog::{CatalogIndex, CompositeResult};
use publog::test_utils::fixtures::synthetic_items;

const THREADS: usize = 8;
const ROUNDS: usize = 1000;
const QUERIES: [&str; 4] = ["night vision", "camera", "hexagon assembly", "filter electrical"];

fn nsns(results: &[CompositeResult]) -> Vec<String> {
    results.iter().map(|r| r.item.nsn.clone()).collect()
}

#[test]
fn concurrent_name_search_matches_sequential_baseline() {
    let index = Arc::new(CatalogIndex::new());
    index.load_items(synthetic_items(2_000));

    let baseline: Vec<Vec<String>> = QUERIES
        .iter()
        .map(|q| nsns(&index.search_by_name(q).unwrap()))
        .collect();
    assert!(baseline.iter().all(|b| !b.is_empty()));
    let baseline = Arc::new(baseline);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let index = Arc::clone(&index);
            let baseline = Arc::clone(&baseline);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    let q = (t + round) % QUERIES.len();
                    let results = index.search_by_name(QUERIES[q]).unwrap();
                    assert_eq!(nsns(&results), baseline[q]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("search thread panicked");
    }
    assert_eq!(index.stats().items, 2_000);
}

#[test]
fn searches_run_alongside_loads() {
    let index = Arc::new(CatalogIndex::new());
    let items = synthetic_items(4_000);
    let (first, second) = items.split_at(2_000);
    index.load_items(first.to_vec());

    let reader = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for _ in 0..200 {
                // Each search sees a whole batch or none of it.
                let count = index.search_by_name("camera").map_or(0, |r| r.len());
                assert!(count == 250 || count == 500, "partial batch visible: {count}");
            }
        })
    };

    index.load_items(second.to_vec());
    reader.join().expect("reader thread panicked");
    assert_eq!(index.stats().items, 4_000);
}
