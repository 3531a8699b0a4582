use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use localdex::{DocumentItem, Field, IndexConfig, SearchIndex};
use localdex::analysis::analyzer::Analyzer;
use localdex::index::inverted::InvertedIndex;
use localdex::search::executor::QueryExecutor;
use std::sync::Arc;
use rand::Rng;

const WORDS: [&str; 12] = [
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog",
    "settings", "network", "display", "battery",
];

/// Helper to create test documents
fn create_test_document(id: u64, content_size: usize) -> DocumentItem {
    let mut rng = rand::thread_rng();
    let content: String = (0..content_size)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ");

    DocumentItem::new(format!("doc-{}", id))
        .with_field(Field::new("title", format!("Document {}", id), 2.0))
        .with_field(Field::text("content", content))
}

fn build_index(doc_count: u64) -> SearchIndex {
    let mut index = SearchIndex::new("bench", IndexConfig::default()).unwrap();
    let docs = (0..doc_count).map(|id| create_test_document(id, 100)).collect();
    index.add_or_update(docs).unwrap();
    index.wait_idle().unwrap();
    index
}

/// Benchmark a single add_or_update through the background worker
fn bench_single_insert(c: &mut Criterion) {
    let mut index = SearchIndex::new("bench", IndexConfig::default()).unwrap();

    c.bench_function("single_document_insert", |b| {
        let mut id = 0;
        b.iter(|| {
            let mut handle = index.add_or_update(vec![create_test_document(id, 100)]).unwrap();
            index.wait(&mut handle).unwrap();
            id += 1;
        });
    });
}

/// Benchmark batch insertion; larger batches cross the rayon threshold
fn bench_batch_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_insert");

    for batch_size in [10, 100, 500, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, &batch_size| {
                let mut index = SearchIndex::new("bench", IndexConfig::default()).unwrap();
                let mut id_counter = 0u64;

                b.iter(|| {
                    let docs: Vec<DocumentItem> = (0..batch_size)
                        .map(|_| {
                            let doc = create_test_document(id_counter, 100);
                            id_counter += 1;
                            doc
                        })
                        .collect();

                    index.add_or_update(docs).unwrap();
                    index.wait_idle().unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark ranked queries with the result cache disabled
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for doc_count in [1_000u64, 10_000].iter() {
        let mut index = InvertedIndex::new();
        let analyzer = Arc::new(Analyzer::default());
        for id in 0..*doc_count {
            let doc = create_test_document(id, 100);
            index.insert(doc.id, &doc.fields, &analyzer).unwrap();
        }
        let executor = QueryExecutor::new(analyzer);

        group.bench_with_input(BenchmarkId::new("single_term", doc_count), &index, |b, index| {
            b.iter(|| executor.execute(index, black_box("network"), 10).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("multi_term", doc_count), &index, |b, index| {
            b.iter(|| executor.execute(index, black_box("quick brown battery"), 10).unwrap());
        });
    }

    group.finish();
}

/// Benchmark repeated queries served from the LRU cache
fn bench_cached_search(c: &mut Criterion) {
    let index = build_index(1_000);

    c.bench_function("cached_search", |b| {
        b.iter(|| index.find(black_box("lazy dog"), 10).unwrap());
    });
}

fn bench_clear(c: &mut Criterion) {
    c.bench_function("clear_index_1000", |b| {
        b.iter_with_setup(|| build_index(1_000), |mut index| index.clear_index());
    });
}

criterion_group!(
    benches,
    bench_single_insert,
    bench_batch_insert,
    bench_search,
    bench_cached_search,
    bench_clear
);
criterion_main!(benches);
