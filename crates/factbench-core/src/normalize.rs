//! Text canonicalization for answer comparison.
//!
//! `normalize` is a total function over any input string: Unicode
//! compatibility decomposition with combining marks stripped, case folded,
//! whitespace collapsed, and one leading article removed. The article list
//! is data, so locale-specific tables can be swapped in without touching
//! the algorithm.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Leading article tokens stripped by the default normalizer.
pub const ENGLISH_ARTICLES: &[&str] = &["the", "a", "an"];

/// Canonicalizes text for comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Normalizer {
    articles: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    /// Normalizer with the English article table.
    pub fn english() -> Self {
        Self {
            articles: ENGLISH_ARTICLES.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Normalizer with a custom article table (e.g. another locale).
    pub fn with_articles(articles: Vec<String>) -> Self {
        Self { articles }
    }

    /// Canonicalize `text`:
    /// (a) NFKD decomposition, combining marks stripped;
    /// (b) lowercased;
    /// (c) whitespace runs collapsed to single spaces, trimmed;
    /// (d) one leading article token removed (not recursively).
    pub fn normalize(&self, text: &str) -> String {
        let decomposed: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
        let folded = decomposed.to_lowercase();
        let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
        self.strip_leading_article(collapsed)
    }

    /// Remove one leading article token (exact word followed by a space).
    fn strip_leading_article(&self, text: String) -> String {
        for article in &self.articles {
            if let Some(rest) = text.strip_prefix(article.as_str()) {
                if let Some(rest) = rest.strip_prefix(' ') {
                    return rest.to_string();
                }
            }
        }
        text
    }
}
