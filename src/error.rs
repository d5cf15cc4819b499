// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Media directory not found: {0}")]
    MediaDirMissing(PathBuf),

    #[error("No record with id {0}")]
    RecordNotFound(u64),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
