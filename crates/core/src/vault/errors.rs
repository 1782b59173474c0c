//! Errors raised while loading notes and building the graph.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    /// Listing a directory or reading a note failed. Invalid UTF-8 lands
    /// here too, as an `InvalidData` I/O error.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The note has no usable top-level heading to take its title from.
    #[error("{} has no title", .path.display())]
    MissingTitle { path: PathBuf },
}

impl NoteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        NoteError::Io { path: path.to_path_buf(), source }
    }

    /// Path of the file or directory that caused the failure.
    pub fn path(&self) -> &Path {
        match self {
            NoteError::Io { path, .. } | NoteError::MissingTitle { path } => path,
        }
    }
}
