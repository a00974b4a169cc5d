// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// One error type per stage boundary. The pipeline inspects these explicitly
// instead of letting any of them abort a run.

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("I/O error while scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No input folder could be enumerated ({0} configured)")]
    NothingEnumerated(usize),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not open PDF document: {0}")]
    Open(String),

    #[error("PDF document has no pages")]
    NoPages,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("GOOGLE_API_KEY is not properly set")]
    MissingApiKey,

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Model returned no text (finish reason: {0})")]
    EmptyResponse(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Download setup failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Generation client setup failed: {0}")]
    Generate(#[from] GenerateError),
}
