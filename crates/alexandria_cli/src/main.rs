//! Command-line inspector for snapshot files.
//!
//! # Responsibility
//! - Verify `alexandria_core` linkage (`ping`, version).
//! - Optionally load one snapshot file and print its chronological listing
//!   and similarity matrix. No prompts, no mutation.

use alexandria_core::{format_date, load_library, Library};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("alexandria_core ping={}", alexandria_core::ping());
    println!("alexandria_core version={}", alexandria_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match load_library(&path) {
        Ok(library) => {
            print_summary(&library);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(library: &Library) {
    println!("library={} articles={}", library.name(), library.len());
    for article in library.get_articles_sorted() {
        println!(
            "{}  {}  [{}]",
            format_date(article.date()),
            article.title(),
            article.tag()
        );
    }

    match library.calculate_all_similarities() {
        Ok(matrix) => {
            for row in matrix {
                let cells: Vec<String> = row.iter().map(|score| format!("{score:.4}")).collect();
                println!("{}", cells.join(" "));
            }
        }
        Err(err) => eprintln!("similarity unavailable: {err}"),
    }
}
