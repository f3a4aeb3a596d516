//! Error types for transom-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for transom-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the compilation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The external compiler exited with a non-zero status, or could not be
    /// launched at all. Carries the captured subprocess output.
    #[error("compilation failed for module {module}: {output}")]
    Compilation { module: String, output: String },

    /// The external compiler could not be located on PATH.
    #[error("transpiler not found: {0}")]
    TranspilerNotFound(String),

    /// The compiler exited successfully but produced no output directory.
    #[error("transpiler produced no output directory at {0}")]
    MissingOutput(PathBuf),

    /// A module path with no usable file name.
    #[error("invalid module path: {0}")]
    InvalidModulePath(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
