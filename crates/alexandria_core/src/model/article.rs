//! Article domain model.
//!
//! # Responsibility
//! - Define the titled, tagged, dated text record catalogued by a library.
//! - Resolve construction dates from `dd/mm/yyyy` input.
//! - Provide the canonical `Title/Tag/Date/Text` dump used by persistence.
//!
//! # Invariants
//! - `title` is never blank.
//! - Construction never fails on a bad date: it falls back to today's date.
//! - Deserialization and `set_date_str` are strict and report bad dates.

use crate::similarity::jaccard::{text_similarity, SimilarityResult};
use crate::snapshot::encode_article;
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// External date format for articles (`day/month/year`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid date regex"));

pub type ArticleResult<T> = Result<T, ArticleError>;

/// Validation and source errors for article construction/update.
#[derive(Debug)]
pub enum ArticleError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Date string does not match `dd/mm/yyyy` or names no calendar day.
    InvalidDate(String),
    /// Article body could not be read from its source file.
    Source {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ArticleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "article title must not be blank"),
            Self::InvalidDate(value) => {
                write!(f, "invalid article date `{value}` (expected dd/mm/yyyy)")
            }
            Self::Source { path, source } => write!(
                f,
                "failed to read article text from `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for ArticleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source { source, .. } => Some(source),
            Self::EmptyTitle | Self::InvalidDate(_) => None,
        }
    }
}

/// Parses a `dd/mm/yyyy` date string.
///
/// Day and month accept one or two digits; the year must have four.
/// Returns `None` for anything else, including impossible days like `31/02/2021`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Formats a date as zero-padded `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_date(date: Option<&str>) -> NaiveDate {
    match date {
        None => today(),
        Some(raw) => match parse_date(raw) {
            Some(parsed) => parsed,
            None => {
                debug!("event=article_date_fallback module=model status=fallback");
                today()
            }
        },
    }
}

fn validate_title(title: &str) -> ArticleResult<()> {
    if title.trim().is_empty() {
        return Err(ArticleError::EmptyTitle);
    }
    Ok(())
}

/// One catalogued document.
///
/// Serialized with the persisted field names (`Title`, `Tag`, `Date`, `Text`)
/// and the date rendered as `dd/mm/yyyy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArticleRecord", into = "ArticleRecord")]
pub struct Article {
    title: String,
    tag: String,
    date: NaiveDate,
    text: String,
}

impl Article {
    /// Creates an article from inline text.
    ///
    /// `date` is parsed as `dd/mm/yyyy`; when absent or unparseable the
    /// current local date is used instead.
    ///
    /// # Errors
    /// - `ArticleError::EmptyTitle` when `title` is blank.
    pub fn new(
        title: impl Into<String>,
        tag: impl Into<String>,
        date: Option<&str>,
        text: impl Into<String>,
    ) -> ArticleResult<Self> {
        Self::with_date(title, tag, resolve_date(date), text)
    }

    /// Creates an article with an already-resolved date.
    pub fn with_date(
        title: impl Into<String>,
        tag: impl Into<String>,
        date: NaiveDate,
        text: impl Into<String>,
    ) -> ArticleResult<Self> {
        let article = Self {
            title: title.into(),
            tag: tag.into(),
            date,
            text: text.into(),
        };
        article.validate()?;
        Ok(article)
    }

    /// Creates an article whose body is read verbatim from `path`.
    ///
    /// # Errors
    /// - `ArticleError::EmptyTitle` when `title` is blank.
    /// - `ArticleError::Source` when the file cannot be read as UTF-8 text.
    pub fn from_file(
        title: impl Into<String>,
        tag: impl Into<String>,
        date: Option<&str>,
        path: impl AsRef<Path>,
    ) -> ArticleResult<Self> {
        let title = title.into();
        validate_title(&title)?;

        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                error!(
                    "event=article_source_read module=model status=error error={}",
                    err
                );
                return Err(ArticleError::Source {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        info!(
            "event=article_source_read module=model status=ok bytes={}",
            text.len()
        );

        Self::with_date(title, tag, resolve_date(date), text)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `(title, tag, date, text)` in one borrow.
    pub fn parts(&self) -> (&str, &str, NaiveDate, &str) {
        (&self.title, &self.tag, self.date, &self.text)
    }

    /// Replaces the title.
    ///
    /// # Errors
    /// - `ArticleError::EmptyTitle` when `title` is blank; the old title is kept.
    pub fn set_title(&mut self, title: impl Into<String>) -> ArticleResult<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Replaces the date from a `dd/mm/yyyy` string.
    ///
    /// Unlike construction, this does not fall back to today's date.
    pub fn set_date_str(&mut self, date: &str) -> ArticleResult<()> {
        self.date = parse_date(date).ok_or_else(|| ArticleError::InvalidDate(date.to_string()))?;
        Ok(())
    }

    /// Checks article invariants; every constructor and conversion runs it.
    pub fn validate(&self) -> ArticleResult<()> {
        validate_title(&self.title)
    }

    /// Jaccard similarity of the two bodies' space-delimited token sets,
    /// rounded to four decimals.
    ///
    /// # Errors
    /// - `SimilarityError::EmptyVocabulary` when both token sets are empty.
    pub fn calculate_similarity(&self, other: &Article) -> SimilarityResult<f64> {
        text_similarity(&self.text, &other.text)
    }
}

impl Display for Article {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode_article(self))
    }
}

/// Wire shape of one article, shared by serde and the snapshot codec.
///
/// Holds the date as raw text; conversion into `Article` validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Text")]
    pub text: String,
}

impl TryFrom<ArticleRecord> for Article {
    type Error = ArticleError;

    fn try_from(value: ArticleRecord) -> Result<Self, Self::Error> {
        let date =
            parse_date(&value.date).ok_or_else(|| ArticleError::InvalidDate(value.date.clone()))?;
        Self::with_date(value.title, value.tag, date, value.text)
    }
}

impl From<Article> for ArticleRecord {
    fn from(value: Article) -> Self {
        Self {
            date: format_date(value.date),
            title: value.title,
            tag: value.tag,
            text: value.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_date, today, Article, ArticleError};
    use chrono::NaiveDate;

    #[test]
    fn parse_date_accepts_padded_and_unpadded_fields() {
        assert_eq!(
            parse_date("21/10/2021"),
            NaiveDate::from_ymd_opt(2021, 10, 21)
        );
        assert_eq!(parse_date("1/2/2021"), NaiveDate::from_ymd_opt(2021, 2, 1));
    }

    #[test]
    fn parse_date_rejects_other_shapes() {
        assert_eq!(parse_date("2021/10/21"), None);
        assert_eq!(parse_date("21/10/21"), None);
        assert_eq!(parse_date(" 21/10/2021"), None);
        assert_eq!(parse_date("31/02/2021"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn format_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(format_date(date), "07/03/2021");
    }

    #[test]
    fn unparseable_date_falls_back_to_today() {
        let article = Article::new("title", "tema", Some("not a date"), "texto").unwrap();
        assert_eq!(article.date(), today());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = Article::new("   ", "tema", None, "texto").unwrap_err();
        assert!(matches!(err, ArticleError::EmptyTitle));
    }

    #[test]
    fn validate_accepts_constructed_articles_and_flags_blank_titles() {
        let article = Article::new("title", "tema", None, "texto").unwrap();
        assert!(article.validate().is_ok());

        let blank = Article {
            title: "\t ".to_string(),
            ..article
        };
        assert!(matches!(blank.validate(), Err(ArticleError::EmptyTitle)));
    }

    #[test]
    fn set_title_keeps_previous_value_on_error() {
        let mut article = Article::new("title", "tema", None, "texto").unwrap();
        assert!(article.set_title("").is_err());
        assert_eq!(article.title(), "title");
    }
}
