//! Error types shared by the collection pipeline.
//!
//! Nothing in the pipeline catches these: every error unwinds to `main`,
//! which reports it and exits. The last flushed snapshot on disk is the
//! recovery point.

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the scrobbling service.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    #[error("{endpoint} reported error {code}: {message}")]
    Api {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    #[error("Requested page {requested} but server reported page {reported}")]
    PageRegression { requested: u32, reported: u32 },
}

/// Failures reading or writing artifact files.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
