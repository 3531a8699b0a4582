use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use crate::core::config::IndexConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::engine::search_index::SearchIndex;

pub type SharedIndex = Arc<Mutex<SearchIndex>>;

/// Registry for named, independent search indexes
///
/// Hosts create one registry and pass it around instead of relying on a
/// process-wide singleton. Destroying an entry drops the registry's
/// reference; the index (and its worker) go away once the last handle does.
#[derive(Default)]
pub struct IndexRegistry {
    indexes: RwLock<HashMap<String, SharedIndex>>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        IndexRegistry {
            indexes: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, name: &str, config: IndexConfig) -> Result<SharedIndex> {
        if name.is_empty() {
            return Err(Error::invalid_argument("index name must not be empty"));
        }

        let mut indexes = self.indexes.write();
        if indexes.contains_key(name) {
            return Err(Error::new(ErrorKind::AlreadyExists, format!("index '{}' already exists", name)));
        }

        let index = Arc::new(Mutex::new(SearchIndex::new(name, config)?));
        indexes.insert(name.to_string(), index.clone());
        Ok(index)
    }

    pub fn get(&self, name: &str) -> Option<SharedIndex> {
        self.indexes.read().get(name).cloned()
    }

    /// Like `get`, but returns a descriptive `NotFound` error
    pub fn lookup(&self, name: &str) -> Result<SharedIndex> {
        self.get(name)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("index '{}' not found", name)))
    }

    /// Existing index, or a new one built from `config`
    pub fn get_or_create(&self, name: &str, config: IndexConfig) -> Result<SharedIndex> {
        if let Some(index) = self.get(name) {
            return Ok(index);
        }
        match self.create(name, config) {
            Err(e) if e.is(ErrorKind::AlreadyExists) => self.lookup(name),
            other => other,
        }
    }

    pub fn destroy(&self, name: &str) -> bool {
        let removed = self.indexes.write().remove(name);
        if removed.is_some() {
            tracing::info!(target: "localdex::registry", index = name, "index destroyed");
        }
        removed.is_some()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indexes.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.indexes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.read().is_empty()
    }
}
