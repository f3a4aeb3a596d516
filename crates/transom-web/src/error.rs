//! Error types for transom-web.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for transom-web operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while publishing compiled assets.
#[derive(Debug, Error)]
pub enum Error {
    /// An entry-point path without a UTF-8 file name and parent directory.
    #[error("invalid entry-point path: {0}")]
    InvalidEntryPoint(PathBuf),
}
