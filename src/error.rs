use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type for python-switchers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to run {}: {source}", path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}
