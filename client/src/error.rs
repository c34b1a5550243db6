use std::path::PathBuf;
use thiserror::Error;

/// Startup preconditions that cannot be met. The process exits with status 1.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading accounts file {path}: {source}")]
    ReadAccounts {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no accounts found in {0}")]
    NoAccounts(PathBuf),
    #[error("account on line {line} of {path} is not a valid cookie header value")]
    InvalidCredential { path: PathBuf, line: usize },

    #[error("error reading config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response is not JSON: {0}")]
    Body(#[from] serde_json::Error),
}

/// Why a single step could not complete. Never escapes the step that raised it.
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("invalid timestamp {raw:?}: {source}")]
    Timestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl StepError {
    /// The API's own rejection text, if that is what this is.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            StepError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}
