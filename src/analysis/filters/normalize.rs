use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Strips in-word punctuation such as apostrophes and decimal points,
/// so `don't` and `dont` index to the same term.
pub struct NormalizeFilter;

impl TokenFilter for NormalizeFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter_map(|mut token| {
                if token.text.chars().any(|c| !c.is_alphanumeric()) {
                    token.text.retain(char::is_alphanumeric);
                }
                (!token.text.is_empty()).then_some(token)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "normalize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_inner_punctuation() {
        let tokens = vec![
            Token::new("don't".to_string(), 0, 0),
            Token::new("3.14".to_string(), 1, 6),
            Token::new("plain".to_string(), 2, 11),
        ];
        let out: Vec<String> = NormalizeFilter.filter(tokens).into_iter().map(|t| t.text).collect();
        assert_eq!(out, vec!["dont", "314", "plain"]);
    }
}
