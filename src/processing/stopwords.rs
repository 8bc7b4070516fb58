//! Fixed stopword list excluded from keyword scoring

use std::collections::HashSet;

/// Short Russian function words that carry no signal for matching
pub const STOPWORDS: [&str; 10] = ["в", "и", "на", "с", "по", "для", "что", "как", "это", "то"];

/// Membership test against [`STOPWORDS`]. Tokens are expected to be lowercased.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Drop every stopword from a token set
pub fn filter(tokens: HashSet<String>) -> HashSet<String> {
    tokens.into_iter().filter(|token| !is_stopword(token)).collect()
}
