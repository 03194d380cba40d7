//! Similarity queries over a whole library.
//!
//! # Invariants
//! - Score vectors follow stored article order.
//! - The best match is never value-equal to the query article.
//! - Equal best scores resolve to the lowest stored index.

use crate::model::article::Article;
use crate::model::library::Library;
use crate::similarity::jaccard::{jaccard_index, token_set, SimilarityError, SimilarityResult};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RankResult<T> = Result<T, RankError>;

/// Error for best-match queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Library has no candidate besides the query article.
    InsufficientData { members: usize },
    Similarity(SimilarityError),
}

impl Display for RankError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData { members } => write!(
                f,
                "library with {members} article(s) has no other article to compare against"
            ),
            Self::Similarity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RankError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InsufficientData { .. } => None,
            Self::Similarity(err) => Some(err),
        }
    }
}

impl From<SimilarityError> for RankError {
    fn from(value: SimilarityError) -> Self {
        Self::Similarity(value)
    }
}

impl Library {
    /// Similarity of every stored article to `article`, in stored order.
    ///
    /// A stored article equal to `article` scores `1.0`.
    pub fn calculate_similarities(&self, article: &Article) -> SimilarityResult<Vec<f64>> {
        let query = token_set(article.text());
        self.articles()
            .iter()
            .map(|stored| jaccard_index(&token_set(stored.text()), &query))
            .collect()
    }

    /// Full similarity matrix; row `i` is `calculate_similarities(&articles[i])`.
    pub fn calculate_all_similarities(&self) -> SimilarityResult<Vec<Vec<f64>>> {
        let token_sets: Vec<HashSet<&str>> = self
            .articles()
            .iter()
            .map(|article| token_set(article.text()))
            .collect();

        token_sets
            .iter()
            .map(|row| {
                token_sets
                    .iter()
                    .map(|column| jaccard_index(column, row))
                    .collect::<SimilarityResult<Vec<f64>>>()
            })
            .collect()
    }

    /// Index and score of the stored article most similar to `article`.
    ///
    /// Articles value-equal to `article` are skipped. Ties go to the lowest index.
    ///
    /// # Errors
    /// - `RankError::InsufficientData` when the library has fewer than two
    ///   articles or every article equals `article`.
    /// - `RankError::Similarity` when a pair cannot be scored.
    pub fn get_greatest_similarity(&self, article: &Article) -> RankResult<(usize, f64)> {
        let members = self.len();
        if members < 2 {
            return Err(RankError::InsufficientData { members });
        }

        let query = token_set(article.text());
        let mut best: Option<(usize, f64)> = None;
        for (index, stored) in self.articles().iter().enumerate() {
            if stored == article {
                continue;
            }
            let score = jaccard_index(&token_set(stored.text()), &query)?;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }

        best.ok_or(RankError::InsufficientData { members })
    }

    /// The stored article resolved from [`Library::get_greatest_similarity`].
    pub fn get_article_by_greatest_similarity(&self, article: &Article) -> RankResult<&Article> {
        let (index, _) = self.get_greatest_similarity(article)?;
        Ok(&self.articles()[index])
    }
}

#[cfg(test)]
mod tests {
    use super::RankError;
    use crate::model::article::Article;
    use crate::model::library::Library;

    fn article(title: &str, text: &str) -> Article {
        Article::new(title, "tema", Some("21/10/2021"), text).unwrap()
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let query = article("q", "a b");
        let library = Library::with_articles(
            "BAE",
            vec![
                query.clone(),
                article("x", "a c"),
                article("y", "b c"),
                article("z", "d"),
            ],
        );

        assert_eq!(library.get_greatest_similarity(&query), Ok((1, 0.3333)));
    }

    #[test]
    fn single_member_library_has_insufficient_data() {
        let query = article("q", "a b");
        let library = Library::with_articles("BAE", vec![query.clone()]);
        assert_eq!(
            library.get_greatest_similarity(&query),
            Err(RankError::InsufficientData { members: 1 })
        );
    }

    #[test]
    fn copies_of_the_query_are_never_returned() {
        let query = article("q", "a b");
        let library = Library::with_articles("BAE", vec![query.clone(), query.clone()]);
        assert_eq!(
            library.get_greatest_similarity(&query),
            Err(RankError::InsufficientData { members: 2 })
        );
    }
}
