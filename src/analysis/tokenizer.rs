use crate::analysis::token::Token;
use unicode_segmentation::UnicodeSegmentation;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;
}

/// Splits on Unicode word boundaries (UAX #29)
#[derive(Debug, Clone, Default)]
pub struct StandardTokenizer;

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.unicode_word_indices()
            .enumerate()
            .map(|(position, (offset, word))| Token::new(word.to_string(), position as u32, offset))
            .collect()
    }

    fn name(&self) -> &str {
        "standard"
    }
}
