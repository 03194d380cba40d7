//! Library aggregate: a named, ordered collection of articles.
//!
//! # Responsibility
//! - Own add/remove/lookup operations over stored articles.
//! - Produce filtered and chronologically sorted views.
//!
//! # Invariants
//! - Stored order is insertion order; query methods never reorder it.
//! - Lookups by name/tag/date return empty results instead of errors.
//! - `get_articles_sorted` is stable for equal dates.

use crate::model::article::Article;
use crate::snapshot::encode_library;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Collection-level error for library mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// No stored article is value-equal to the requested one.
    ArticleNotFound { title: String },
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArticleNotFound { title } => {
                write!(f, "article not found in library: `{title}`")
            }
        }
    }
}

impl Error for LibraryError {}

/// Named, ordered collection of articles.
///
/// Two libraries are equal when their names and article sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    name: String,
    articles: Vec<Article>,
}

impl Library {
    /// Creates an empty library.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_articles(name, Vec::new())
    }

    /// Creates a library pre-populated with `articles`, order preserved.
    pub fn with_articles(name: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            name: name.into(),
            articles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stored articles in insertion order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Appends an article. Duplicates (by title or by value) are allowed.
    pub fn add_article(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// Removes the first article titled exactly `title`.
    ///
    /// Returns `false` and leaves the collection untouched when none matches.
    pub fn remove_article_by_name(&mut self, title: &str) -> bool {
        match self.position_by_name(title) {
            Some(index) => {
                self.articles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first article value-equal to `article` and returns it.
    ///
    /// # Errors
    /// - `LibraryError::ArticleNotFound` when no stored article is equal.
    pub fn remove_article(&mut self, article: &Article) -> LibraryResult<Article> {
        let index = self
            .articles
            .iter()
            .position(|stored| stored == article)
            .ok_or_else(|| LibraryError::ArticleNotFound {
                title: article.title().to_string(),
            })?;
        Ok(self.articles.remove(index))
    }

    /// First article titled exactly `title`.
    pub fn get_article_by_name(&self, title: &str) -> Option<&Article> {
        self.position_by_name(title).map(|index| &self.articles[index])
    }

    /// All articles tagged exactly `tag`, in stored order.
    pub fn get_articles_by_tag(&self, tag: &str) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.tag() == tag)
            .collect()
    }

    /// All articles dated on or after `cutoff`, in stored order.
    pub fn get_articles_by_date(&self, cutoff: NaiveDate) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.date() >= cutoff)
            .collect()
    }

    /// All articles, most recent first.
    ///
    /// Equal dates keep their stored relative order. Stored order is not changed.
    pub fn get_articles_sorted(&self) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        sorted.sort_by_key(|article| Reverse(article.date()));
        sorted
    }

    fn position_by_name(&self, title: &str) -> Option<usize> {
        self.articles
            .iter()
            .position(|article| article.title() == title)
    }
}

impl Display for Library {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode_library(self))
    }
}

#[cfg(test)]
mod tests {
    use super::{Library, LibraryError};
    use crate::model::article::Article;
    use chrono::NaiveDate;

    fn dated(title: &str, day: u32) -> Article {
        let date = NaiveDate::from_ymd_opt(2021, 10, day).unwrap();
        Article::with_date(title, "tema", date, "texto").unwrap()
    }

    #[test]
    fn sorted_view_is_stable_for_equal_dates() {
        let library = Library::with_articles(
            "BAE",
            vec![dated("a", 10), dated("b", 21), dated("c", 10), dated("d", 21)],
        );

        let titles: Vec<&str> = library
            .get_articles_sorted()
            .into_iter()
            .map(Article::title)
            .collect();
        assert_eq!(titles, vec!["b", "d", "a", "c"]);

        let stored: Vec<&str> = library.articles().iter().map(Article::title).collect();
        assert_eq!(stored, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn remove_article_by_name_only_removes_first_match() {
        let mut library =
            Library::with_articles("BAE", vec![dated("dup", 1), dated("dup", 2), dated("x", 3)]);

        assert!(library.remove_article_by_name("dup"));
        assert_eq!(library.len(), 2);
        assert_eq!(library.articles()[0], dated("dup", 2));
    }

    #[test]
    fn remove_article_reports_missing_value() {
        let mut library = Library::with_articles("BAE", vec![dated("a", 1)]);
        let err = library.remove_article(&dated("a", 2)).unwrap_err();
        assert_eq!(
            err,
            LibraryError::ArticleNotFound {
                title: "a".to_string()
            }
        );
        assert_eq!(library.len(), 1);
    }
}
