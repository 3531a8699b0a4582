use std::collections::HashSet;
use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

const ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for",
    "from", "has", "he", "in", "is", "it", "its", "of", "on",
    "that", "the", "to", "was", "will", "with",
];

/// Drops tokens found in a stop list
///
/// Runs after normalization, so list entries are written in normalized
/// form (`its`, not `it's`).
pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWordFilter {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn english() -> Self {
        StopWordFilter::new(ENGLISH.iter().copied())
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }

    fn name(&self) -> &str {
        "stop_words"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_listed_words_and_keeps_positions() {
        let tokens = vec![
            Token::new("the".to_string(), 0, 0),
            Token::new("art".to_string(), 1, 4),
            Token::new("of".to_string(), 2, 8),
            Token::new("war".to_string(), 3, 11),
        ];
        let out = StopWordFilter::english().filter(tokens);
        let kept: Vec<(&str, u32)> = out.iter().map(|t| (t.text.as_str(), t.position)).collect();
        assert_eq!(kept, vec![("art", 1), ("war", 3)]);
    }

    #[test]
    fn test_match_is_exact() {
        let filter = StopWordFilter::new(["its"]);
        let out = filter.filter(vec![
            Token::new("its".to_string(), 0, 0),
            Token::new("it's".to_string(), 1, 4),
            Token::new("Its".to_string(), 2, 9),
        ]);
        let kept: Vec<String> = out.into_iter().map(|t| t.text).collect();
        assert_eq!(kept, vec!["it's", "Its"]);
    }
}
