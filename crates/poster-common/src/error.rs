//! Error types for map-poster generation.

use thiserror::Error;

/// Result type alias using PosterError.
pub type PosterResult<T> = Result<T, PosterError>;

/// Primary error type for poster generation.
#[derive(Debug, Error)]
pub enum PosterError {
    // === Lookup Errors ===
    #[error("Color scheme not found: {0}")]
    SchemeNotFound(String),

    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    // === Data Errors ===
    #[error("Invalid data in color scheme '{scheme}': {message}")]
    SchemeData { scheme: String, message: String },

    // === Validation Errors ===
    #[error("Validation failed: {0}")]
    Validation(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

/// Failure category, used by callers to branch without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Data,
    Validation,
    Io,
    Config,
    Render,
}

impl PosterError {
    /// Get the failure category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PosterError::SchemeNotFound(_) | PosterError::ThemeNotFound(_) => ErrorKind::NotFound,
            PosterError::SchemeData { .. } => ErrorKind::Data,
            PosterError::Validation(_) => ErrorKind::Validation,
            PosterError::Io(_) => ErrorKind::Io,
            PosterError::Config(_) => ErrorKind::Config,
            PosterError::Render(_) => ErrorKind::Render,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => 2,
            ErrorKind::Data | ErrorKind::Config => 3,
            ErrorKind::Io => 4,
            ErrorKind::Render => 5,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for PosterError {
    fn from(err: std::io::Error) -> Self {
        PosterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PosterError {
    fn from(err: serde_json::Error) -> Self {
        PosterError::Config(format!("JSON error: {}", err))
    }
}
