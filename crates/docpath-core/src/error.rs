//! Error types for Docpath Core

use thiserror::Error;

/// Result type alias using Docpath's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Docpath error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid path symbol `{symbol}` in `{path}`, must be one of `r`, `c`, `m`")]
    InvalidPath { symbol: char, path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
