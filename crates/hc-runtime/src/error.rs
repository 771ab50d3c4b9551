//! Error types for the Chrome runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a headless Chrome process.
#[derive(Debug, Error)]
pub enum Error {
    /// No Chrome executable could be located.
    #[error("Chrome executable not found. Set CHROME_PATH or install Google Chrome.")]
    ExecutableNotFound,

    /// Failed to launch the Chrome process.
    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    /// Transport-level error (stdio communication).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
