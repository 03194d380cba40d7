//! Core domain logic for Alexandria.
//! This crate is the single source of truth for article/library invariants.

pub mod logging;
pub mod model;
pub mod similarity;
pub mod snapshot;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::article::{
    format_date, parse_date, today, Article, ArticleError, ArticleRecord, ArticleResult,
    DATE_FORMAT,
};
pub use model::library::{Library, LibraryError, LibraryResult};
pub use similarity::jaccard::{
    jaccard_index, text_similarity, token_set, SimilarityError, SimilarityResult,
    SIMILARITY_PRECISION,
};
pub use similarity::ranking::{RankError, RankResult};
pub use snapshot::{
    decode_library, encode_article, encode_library, load_library, save_library, SnapshotError,
    SnapshotResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
