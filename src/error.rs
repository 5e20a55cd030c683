//! Unified error types for feedcheck.
//!
//! Defines [`FeedCheckError`], the main crate error enum, using
//! `thiserror` for `Display` and `Error` derives. Input errors are
//! fatal and reported before any record is checked; failed checks
//! surface as [`FeedCheckError::ChecksFailed`] after the full report
//! has been printed.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FeedCheckError {
    #[error("{} not found", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid JSON in {path}: {source}")]
    DatasetParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No 'updaters' field found in {path}")]
    MissingUpdaters { path: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{failed} failed check(s), {structure_errors} structural error(s)")]
    ChecksFailed {
        failed: usize,
        structure_errors: usize,
    },
}
