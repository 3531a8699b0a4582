#![allow(dead_code)]

use localdex::{DocumentItem, IndexConfig, SearchIndex};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn new_index(name: &str) -> SearchIndex {
    init_tracing();
    SearchIndex::new(name, IndexConfig::default()).expect("index should start")
}

/// Index `docs` and wait for them to land
pub fn build(name: &str, docs: &[(&str, &str)]) -> SearchIndex {
    let mut index = new_index(name);
    let items = docs
        .iter()
        .map(|(id, text)| DocumentItem::from_text(*id, *text))
        .collect();
    index.add_or_update(items).unwrap();
    index.wait_idle().unwrap();
    index
}
