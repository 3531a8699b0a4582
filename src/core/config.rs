use rust_stemmers::Algorithm;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};

/// Languages supported by the optional stemming filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerLanguage {
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Russian,
}

impl StemmerLanguage {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            StemmerLanguage::English => Algorithm::English,
            StemmerLanguage::French => Algorithm::French,
            StemmerLanguage::German => Algorithm::German,
            StemmerLanguage::Spanish => Algorithm::Spanish,
            StemmerLanguage::Italian => Algorithm::Italian,
            StemmerLanguage::Portuguese => Algorithm::Portuguese,
            StemmerLanguage::Dutch => Algorithm::Dutch,
            StemmerLanguage::Russian => Algorithm::Russian,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub min_token_length: usize,           // In chars, inclusive
    pub max_token_length: usize,           // In chars, inclusive
    pub stop_words: bool,                  // Drop common English words
    pub stemming: Option<StemmerLanguage>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            min_token_length: 1,
            max_token_length: 255,
            stop_words: false,
            stemming: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub analyzer: AnalyzerConfig,
    pub query_cache_capacity: usize,       // 0 disables the cache
    pub parallel_batch_threshold: usize,   // Batches this large are analyzed with rayon
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            analyzer: AnalyzerConfig::default(),
            query_cache_capacity: 128,
            parallel_batch_threshold: 256,
        }
    }
}

impl IndexConfig {
    /// Parse a host-supplied JSON blob; missing keys fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.analyzer.stop_words = enabled;
        self
    }

    pub fn with_stemming(mut self, language: StemmerLanguage) -> Self {
        self.analyzer.stemming = Some(language);
        self
    }

    pub fn with_token_length(mut self, min: usize, max: usize) -> Self {
        self.analyzer.min_token_length = min;
        self.analyzer.max_token_length = max;
        self
    }

    pub fn with_query_cache_capacity(mut self, capacity: usize) -> Self {
        self.query_cache_capacity = capacity;
        self
    }

    pub fn with_parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let analyzer = &self.analyzer;
        if analyzer.min_token_length == 0 {
            return Err(Error::invalid_argument("min_token_length must be at least 1"));
        }
        if analyzer.max_token_length < analyzer.min_token_length {
            return Err(Error::invalid_argument(format!(
                "max_token_length ({}) is below min_token_length ({})",
                analyzer.max_token_length, analyzer.min_token_length
            )));
        }
        if self.parallel_batch_threshold == 0 {
            return Err(Error::invalid_argument("parallel_batch_threshold must be at least 1"));
        }
        Ok(())
    }
}
