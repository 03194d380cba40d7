//! Snapshot file load/save.
//!
//! # Invariants
//! - A failed load never touches the target library.
//! - Emits `snapshot_load`/`snapshot_save` events with duration and status only.

use super::codec::{decode_library, encode_library};
use super::{SnapshotError, SnapshotResult};
use crate::model::library::Library;
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Reads and decodes a snapshot file into a new library.
///
/// # Errors
/// - `SnapshotError::NotFound` when `path` does not exist.
/// - `SnapshotError::Io` for other read failures (including non-UTF-8 content).
/// - `SnapshotError::Malformed` when the content is not a library literal.
pub fn load_library(path: impl AsRef<Path>) -> SnapshotResult<Library> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=snapshot_load module=snapshot status=start");

    let result = std::fs::read_to_string(path)
        .map_err(|err| SnapshotError::from_io(path.to_path_buf(), err))
        .and_then(|content| decode_library(&content));

    match &result {
        Ok(library) => info!(
            "event=snapshot_load module=snapshot status=ok duration_ms={} articles={}",
            started_at.elapsed().as_millis(),
            library.len()
        ),
        Err(err) => error!(
            "event=snapshot_load module=snapshot status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    result
}

/// Encodes `library` and writes it to `path`, replacing any existing file.
///
/// # Errors
/// - `SnapshotError::NotFound` when the parent directory does not exist.
/// - `SnapshotError::Io` for other write failures.
pub fn save_library(library: &Library, path: impl AsRef<Path>) -> SnapshotResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=snapshot_save module=snapshot status=start");

    match std::fs::write(path, encode_library(library)) {
        Ok(()) => {
            info!(
                "event=snapshot_save module=snapshot status=ok duration_ms={} articles={}",
                started_at.elapsed().as_millis(),
                library.len()
            );
            Ok(())
        }
        Err(err) => {
            let err = SnapshotError::from_io(path.to_path_buf(), err);
            error!(
                "event=snapshot_save module=snapshot status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

impl Library {
    /// Replaces this library's name and articles with the snapshot at `path`.
    ///
    /// The file is fully decoded before anything is replaced, so on error the
    /// library keeps its previous state.
    pub fn load(&mut self, path: impl AsRef<Path>) -> SnapshotResult<()> {
        *self = load_library(path)?;
        Ok(())
    }

    /// Writes this library as a snapshot file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> SnapshotResult<()> {
        save_library(self, path)
    }
}
