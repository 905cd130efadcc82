use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single call to the embeddings service.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("http client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("embedding service responded with {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
