//! Keyword normalization and shopper intent classification.
//!
//! A cheap lexical pass run alongside retrieval: it does not change what is
//! retrieved or generated, but tags each question so logs and HTTP replies
//! show what kind of question was asked.

use serde::Serialize;

/// What the shopper is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Comparison,
    Recommendation,
    Price,
    Warranty,
    Shipping,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comparison => "comparison",
            Self::Recommendation => "recommendation",
            Self::Price => "price",
            Self::Warranty => "warranty",
            Self::Shipping => "shipping",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase `text`, strip punctuation, split on spaces, and keep words
/// longer than two characters.
pub fn normalize_query(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split(' ')
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Classify normalized keywords. The first matching rule wins, in the order
/// comparison, recommendation, price, warranty, shipping.
pub fn classify_intent(keywords: &[String]) -> Intent {
    let has = |word: &str| keywords.iter().any(|k| k == word);

    if has("compare") {
        Intent::Comparison
    } else if has("best") || has("suggest") {
        Intent::Recommendation
    } else if has("price") {
        Intent::Price
    } else if has("warranty") {
        Intent::Warranty
    } else if has("delivery") || has("shipping") {
        Intent::Shipping
    } else {
        Intent::General
    }
}

/// Normalize and classify in one step.
pub fn detect_intent(text: &str) -> Intent {
    classify_intent(&normalize_query(text))
}
