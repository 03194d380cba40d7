//! Flat text snapshot persistence for libraries.
//!
//! # Responsibility
//! - Encode a library as one literal mapping
//!   `{'Library': name, 'Articles': [{'Title': .., 'Tag': .., 'Date': .., 'Text': ..}, ..]}`.
//! - Decode that literal through an explicit grammar and a fixed schema.
//! - Load/save snapshot files without disturbing in-memory state on failure.
//!
//! # Invariants
//! - Only mappings, sequences and quoted strings are accepted; nothing is evaluated.
//! - Mappings must carry exactly the schema keys, once each.
//! - `decode_library(&encode_library(lib)) == lib` for every valid library.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod codec;
pub mod literal;
mod store;

pub use codec::{decode_library, encode_article, encode_library};
pub use store::{load_library, save_library};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file does not exist.
    NotFound(PathBuf),
    /// Any other file-system failure while reading or writing.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Content is not a well-formed library literal.
    Malformed { message: String },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "snapshot not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "snapshot i/o failure at `{}`: {source}", path.display())
            }
            Self::Malformed { message } => write!(f, "malformed library snapshot: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::Malformed { .. } => None,
        }
    }
}

impl From<literal::LiteralError> for SnapshotError {
    fn from(value: literal::LiteralError) -> Self {
        Self::Malformed {
            message: value.to_string(),
        }
    }
}

impl SnapshotError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// Stable short code used in log events.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "snapshot_not_found",
            Self::Io { .. } => "snapshot_io_failed",
            Self::Malformed { .. } => "snapshot_malformed",
        }
    }
}
