//! Error taxonomy for the ingestion pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while locating and parsing posts.
///
/// Render failures are not represented here: a failed markdown conversion
/// degrades to escaped plain text instead of dropping the post.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The posts root (or a specific post looked up by route) is missing.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// Malformed front matter, missing title, or an unparseable date.
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
