//! Token-set Jaccard similarity.
//!
//! Tokens come from splitting on the single space character only, so
//! newline-joined words such as `"céu;\nSete"` stay one token and empty
//! tokens produced by repeated spaces are kept.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of decimals kept in similarity scores.
pub const SIMILARITY_PRECISION: usize = 4;

pub type SimilarityResult<T> = Result<T, SimilarityError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityError {
    /// Both token sets are empty, so the union has no members to divide by.
    EmptyVocabulary,
}

impl Display for SimilarityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyVocabulary => {
                write!(f, "cannot compare texts with an empty combined vocabulary")
            }
        }
    }
}

impl Error for SimilarityError {}

/// Unique tokens of `text` split on `' '`.
pub fn token_set(text: &str) -> HashSet<&str> {
    text.split(' ').collect()
}

/// `|a ∩ b| / |a ∪ b|`, rounded to [`SIMILARITY_PRECISION`] decimals.
///
/// # Errors
/// - `SimilarityError::EmptyVocabulary` when both sets are empty.
pub fn jaccard_index(a: &HashSet<&str>, b: &HashSet<&str>) -> SimilarityResult<f64> {
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return Err(SimilarityError::EmptyVocabulary);
    }
    Ok(round_score(shared as f64 / union as f64))
}

/// Similarity of two raw texts.
pub fn text_similarity(a: &str, b: &str) -> SimilarityResult<f64> {
    jaccard_index(&token_set(a), &token_set(b))
}

/// Rounds the exact binary value half-to-even, as decimal formatting does.
fn round_score(value: f64) -> f64 {
    let rendered = format!("{value:.prec$}", prec = SIMILARITY_PRECISION);
    rendered.parse().unwrap_or(value)
}
