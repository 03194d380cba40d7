//! Textual similarity entry points.
//!
//! # Responsibility
//! - Score two texts by Jaccard overlap of their space-delimited tokens.
//! - Rank library members against a query article.
//!
//! # Invariants
//! - Scores are symmetric, lie in `[0, 1]` and carry four decimals.
//! - Ranking ties resolve to the lowest stored index.

pub mod jaccard;
pub mod ranking;
