// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("expected {expected} hand landmarks, found {found}")]
    LandmarkCount { expected: usize, found: usize },

    #[error("malformed landmark frame on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
