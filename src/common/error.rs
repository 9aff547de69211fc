use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Convert was invoked with no images selected.
    #[error("Add images")]
    EmptySelection,

    #[error("{name} is not an {expected} file (detected {detected})")]
    UnsupportedMedia {
        name: String,
        expected: &'static str,
        detected: String,
    },

    #[error("File error on {path}: {source}")]
    File { path: PathBuf, source: io::Error },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service responded {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, ClientError::EmptySelection)
    }
}
