use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::length::LengthFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::normalize::NormalizeFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use crate::core::config::AnalyzerConfig;

/// Text analysis pipeline
///
/// Documents and queries go through the same analyzer, so a query term
/// matches exactly the terms produced at indexing time. Analysis never
/// fails: text without any word yields an empty token list.
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            if tokens.is_empty() {
                break;
            }
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Build the pipeline described by `config`
    ///
    /// Order matters: stop words are matched against the normalized form
    /// (`it's` and `its` must agree), and the length bounds apply to the
    /// final (possibly stemmed) term.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let mut analyzer = Analyzer::new("configured".to_string(), Box::new(StandardTokenizer))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(NormalizeFilter));

        if config.stop_words {
            analyzer = analyzer.add_filter(Box::new(StopWordFilter::english()));
        }

        if let Some(language) = config.stemming {
            analyzer = analyzer.add_filter(Box::new(StemmerFilter::new(language.algorithm())));
        }

        analyzer.add_filter(Box::new(LengthFilter::new(config.min_token_length, config.max_token_length)))
    }

    /// Names of the pipeline stages, tokenizer first
    pub fn pipeline(&self) -> Vec<&str> {
        std::iter::once(self.tokenizer.name())
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::from_config(&AnalyzerConfig::default())
    }
}
