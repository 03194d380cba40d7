use alexandria_core::{today, Article, Library, LibraryError};
use chrono::NaiveDate;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn verse(title: &str, date: Option<&str>) -> Article {
    Article::from_file(title, "tema", date, fixture("ring_verse.txt")).unwrap()
}

fn short_verse(title: &str, date: Option<&str>) -> Article {
    Article::from_file(title, "tema", date, fixture("ring_verse_short.txt")).unwrap()
}

fn day(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_library_is_empty() {
    let library = Library::new("BAE");
    assert_eq!(library.name(), "BAE");
    assert!(library.is_empty());
    assert!(library.articles().is_empty());
}

#[test]
fn library_keeps_initial_articles_in_order() {
    let first = verse("title", None);
    let second = short_verse("title", None);
    let library = Library::with_articles("BAE", vec![first.clone(), second.clone()]);
    assert_eq!(library.articles(), &[first, second]);
}

#[test]
fn add_article_appends_without_duplicate_check() {
    let first = verse("title", None);
    let mut library = Library::with_articles("BAE", vec![first.clone()]);
    library.add_article(first.clone());
    library.add_article(short_verse("title_2", None));

    assert_eq!(library.len(), 3);
    assert_eq!(library.articles()[0], first);
    assert_eq!(library.articles()[1], first);
    assert_eq!(library.articles()[2].title(), "title_2");
}

#[test]
fn remove_article_by_name_removes_match() {
    let first = verse("title", None);
    let second = short_verse("title_2", None);
    let mut library = Library::with_articles("BAE", vec![first, second.clone()]);

    assert!(library.remove_article_by_name("title"));
    assert_eq!(library.articles(), &[second]);
}

#[test]
fn remove_article_by_name_not_found_leaves_library_unchanged() {
    let first = verse("title", None);
    let second = short_verse("title_2", None);
    let mut library = Library::with_articles("BAE", vec![first.clone(), second.clone()]);

    assert!(!library.remove_article_by_name("title_3"));
    assert_eq!(library.articles(), &[first, second]);
}

#[test]
fn remove_article_removes_equal_value() {
    let first = verse("title", None);
    let second = short_verse("title_2", None);
    let mut library = Library::with_articles("BAE", vec![first.clone(), second.clone()]);

    let removed = library.remove_article(&second).unwrap();
    assert_eq!(removed, second);
    assert_eq!(library.articles(), &[first]);

    let err = library.remove_article(&second).unwrap_err();
    assert_eq!(
        err,
        LibraryError::ArticleNotFound {
            title: "title_2".to_string()
        }
    );
}

#[test]
fn display_renders_whole_library() {
    let first = Article::new("title", "tema", Some("10/10/2021"), "text").unwrap();
    let second = Article::new("title_2", "tema", Some("21/10/2021"), "text_2").unwrap();
    let library = Library::with_articles("BAE", vec![first, second]);

    assert_eq!(
        library.to_string(),
        "{'Library': 'BAE', 'Articles': [\
         {'Title': 'title', 'Tag': 'tema', 'Date': '10/10/2021', 'Text': 'text'}, \
         {'Title': 'title_2', 'Tag': 'tema', 'Date': '21/10/2021', 'Text': 'text_2'}]}"
    );
}

#[test]
fn get_article_by_name_returns_first_match_or_none() {
    let first = verse("title", None);
    let second = short_verse("title_2", None);
    let duplicate = short_verse("title", None);
    let library = Library::with_articles("BAE", vec![first.clone(), second, duplicate]);

    assert_eq!(library.get_article_by_name("title"), Some(&first));
    assert_eq!(library.get_article_by_name("title_3"), None);
}

#[test]
fn get_articles_by_tag_filters_exact_tag() {
    let first = verse("title", None);
    let second = short_verse("title_2", None);
    let mut other = short_verse("title_3", None);
    other.set_tag("Tema");
    let library = Library::with_articles("BAE", vec![first.clone(), other, second.clone()]);

    assert_eq!(library.get_articles_by_tag("tema"), vec![&first, &second]);
    assert!(library.get_articles_by_tag("tema_2").is_empty());
}

#[test]
fn get_articles_by_date_uses_inclusive_lower_bound() {
    let current = verse("title", None);
    let older = short_verse("title_2", Some("21/10/2021"));
    let library = Library::with_articles("BAE", vec![current.clone(), older.clone()]);

    assert_eq!(
        library.get_articles_by_date(day(25, 10, 2021)),
        vec![&current]
    );
    assert_eq!(
        library.get_articles_by_date(day(21, 10, 2021)),
        vec![&current, &older]
    );
    assert!(library
        .get_articles_by_date(today().succ_opt().unwrap())
        .is_empty());
}

#[test]
fn get_articles_by_date_keeps_stored_order() {
    let library = Library::with_articles(
        "BAE",
        vec![
            Article::new("a", "t", Some("10/10/2021"), "x").unwrap(),
            Article::new("b", "t", Some("21/10/2021"), "x").unwrap(),
            Article::new("c", "t", Some("15/10/2021"), "x").unwrap(),
        ],
    );

    let titles: Vec<&str> = library
        .get_articles_by_date(day(10, 10, 2021))
        .into_iter()
        .map(Article::title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn get_articles_sorted_is_most_recent_first_and_does_not_mutate() {
    let current = verse("title", None);
    let older = short_verse("title_2", Some("21/10/2021"));
    let library = Library::with_articles("BAE", vec![older.clone(), current.clone()]);

    let sorted = library.get_articles_sorted();
    assert_eq!(sorted, vec![&current, &older]);
    assert!(sorted.windows(2).all(|pair| pair[0].date() >= pair[1].date()));
    assert_eq!(library.articles(), &[older, current]);
}

#[test]
fn get_articles_sorted_is_idempotent() {
    let library = Library::with_articles(
        "BAE",
        vec![
            Article::new("a", "t", Some("10/10/2021"), "x").unwrap(),
            Article::new("b", "t", Some("21/10/2021"), "x").unwrap(),
            Article::new("c", "t", Some("10/10/2021"), "y").unwrap(),
        ],
    );

    let once: Vec<Article> = library.get_articles_sorted().into_iter().cloned().collect();
    let twice = Library::with_articles("copy", once.clone());
    let again: Vec<Article> = twice.get_articles_sorted().into_iter().cloned().collect();
    assert_eq!(once, again);

    let titles: Vec<&str> = once.iter().map(Article::title).collect();
    assert_eq!(titles, vec!["b", "a", "c"]);
}

#[test]
fn set_name_updates_label() {
    let mut library = Library::new("BAE");
    library.set_name("IMECC");
    assert_eq!(library.name(), "IMECC");
}
