// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildContextError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Scan error: {0}")]
    ScanError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildContextError {
    /// Recover the underlying `std::io::Error` from a filesystem-layer error.
    ///
    /// The `fs` module wraps io errors with `anyhow` context; callers that
    /// promise to surface raw I/O failures unwrap them here. Anything that
    /// is not an io error stays in [`BuildContextError::Other`].
    pub fn from_fs(err: anyhow::Error) -> Self {
        match err.downcast::<std::io::Error>() {
            Ok(io) => BuildContextError::IoError(io),
            Err(other) => BuildContextError::Other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildContextError>;
