use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops tokens outside `[min, max]` characters
pub struct LengthFilter {
    pub min: usize,
    pub max: usize,
}

impl LengthFilter {
    pub fn new(min: usize, max: usize) -> Self {
        LengthFilter { min, max }
    }
}

impl TokenFilter for LengthFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| {
                let chars = token.text.chars().count();
                chars >= self.min && chars <= self.max
            })
            .collect()
    }

    fn name(&self) -> &str {
        "length"
    }
}
