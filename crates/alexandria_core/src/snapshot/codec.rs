//! Schema mapping between `Library` and the snapshot literal.

use crate::model::article::{format_date, Article, ArticleRecord};
use crate::model::library::Library;
use crate::snapshot::literal::{parse_literal, write_quoted, LiteralValue};
use crate::snapshot::{SnapshotError, SnapshotResult};

const KEY_LIBRARY: &str = "Library";
const KEY_ARTICLES: &str = "Articles";
const KEY_TITLE: &str = "Title";
const KEY_TAG: &str = "Tag";
const KEY_DATE: &str = "Date";
const KEY_TEXT: &str = "Text";

const LIBRARY_KEYS: &[&str] = &[KEY_LIBRARY, KEY_ARTICLES];
const ARTICLE_KEYS: &[&str] = &[KEY_TITLE, KEY_TAG, KEY_DATE, KEY_TEXT];

/// Renders one article as `{'Title': .., 'Tag': .., 'Date': 'dd/mm/yyyy', 'Text': ..}`.
pub fn encode_article(article: &Article) -> String {
    let mut out = String::with_capacity(article.text().len() + 64);
    write_article(&mut out, article);
    out
}

/// Renders a whole library as `{'Library': .., 'Articles': [..]}`.
pub fn encode_library(library: &Library) -> String {
    let body_len: usize = library
        .articles()
        .iter()
        .map(|article| article.text().len() + 64)
        .sum();
    let mut out = String::with_capacity(body_len + 32);

    out.push('{');
    write_entry_key(&mut out, KEY_LIBRARY);
    write_quoted(&mut out, library.name());
    out.push_str(", ");
    write_entry_key(&mut out, KEY_ARTICLES);
    out.push('[');
    for (index, article) in library.articles().iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_article(&mut out, article);
    }
    out.push_str("]}");
    out
}

/// Parses and validates snapshot text into a library.
///
/// # Errors
/// - `SnapshotError::Malformed` when the text violates the grammar or schema.
pub fn decode_library(input: &str) -> SnapshotResult<Library> {
    let root = parse_literal(input)?;
    let mut values = expect_fields(root, LIBRARY_KEYS, "snapshot")?
        .into_iter()
        .map(|(_, value)| value);
    let (Some(name_value), Some(articles_value)) = (values.next(), values.next()) else {
        return Err(SnapshotError::malformed("snapshot is incomplete"));
    };

    let name = expect_string(name_value, KEY_LIBRARY)?;
    let items = match articles_value {
        LiteralValue::List(items) => items,
        other => {
            return Err(SnapshotError::malformed(format!(
                "`{KEY_ARTICLES}` must be a sequence, found {}",
                other.kind()
            )))
        }
    };

    let mut articles = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        articles.push(decode_article(item, index)?);
    }

    Ok(Library::with_articles(name, articles))
}

fn decode_article(value: LiteralValue, index: usize) -> SnapshotResult<Article> {
    let context = format!("{KEY_ARTICLES}[{index}]");
    let mut strings = Vec::with_capacity(ARTICLE_KEYS.len());
    for (key, value) in expect_fields(value, ARTICLE_KEYS, &context)? {
        strings.push(expect_string(value, &format!("{context}.{key}"))?);
    }
    let [title, tag, date, text]: [String; 4] = strings
        .try_into()
        .map_err(|_| SnapshotError::malformed(format!("{context} is incomplete")))?;
    let record = ArticleRecord {
        title,
        tag,
        date,
        text,
    };

    Article::try_from(record)
        .map_err(|err| SnapshotError::malformed(format!("{context}: {err}")))
}

/// Checks that `value` is a mapping holding exactly `keys`, and returns its
/// entries reordered to match `keys`.
fn expect_fields(
    value: LiteralValue,
    keys: &[&'static str],
    context: &str,
) -> SnapshotResult<Vec<(&'static str, LiteralValue)>> {
    let entries = match value {
        LiteralValue::Map(entries) => entries,
        other => {
            return Err(SnapshotError::malformed(format!(
                "{context} must be a mapping, found {}",
                other.kind()
            )))
        }
    };

    let mut slots: Vec<Option<LiteralValue>> = vec![None; keys.len()];
    for (key, value) in entries {
        let Some(slot) = keys.iter().position(|expected| *expected == key) else {
            return Err(SnapshotError::malformed(format!(
                "{context} has unknown key `{key}`"
            )));
        };
        if slots[slot].is_some() {
            return Err(SnapshotError::malformed(format!(
                "{context} repeats key `{key}`"
            )));
        }
        slots[slot] = Some(value);
    }

    keys.iter()
        .zip(slots)
        .map(|(key, slot)| match slot {
            Some(value) => Ok((*key, value)),
            None => Err(missing_key(key, context)),
        })
        .collect()
}

fn expect_string(value: LiteralValue, field: &str) -> SnapshotResult<String> {
    match value {
        LiteralValue::Str(text) => Ok(text),
        other => Err(SnapshotError::malformed(format!(
            "`{field}` must be a string, found {}",
            other.kind()
        ))),
    }
}

fn missing_key(key: &str, context: &str) -> SnapshotError {
    SnapshotError::malformed(format!("{context} is missing key `{key}`"))
}

fn write_entry_key(out: &mut String, key: &str) {
    write_quoted(out, key);
    out.push_str(": ");
}

fn write_article(out: &mut String, article: &Article) {
    out.push('{');
    write_entry_key(out, KEY_TITLE);
    write_quoted(out, article.title());
    out.push_str(", ");
    write_entry_key(out, KEY_TAG);
    write_quoted(out, article.tag());
    out.push_str(", ");
    write_entry_key(out, KEY_DATE);
    write_quoted(out, &format_date(article.date()));
    out.push_str(", ");
    write_entry_key(out, KEY_TEXT);
    write_quoted(out, article.text());
    out.push('}');
}
