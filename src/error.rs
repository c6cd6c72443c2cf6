//! Easel error types

/// Easel error types
#[derive(Debug, thiserror::Error)]
pub enum EaselError {
    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // Streaming errors
    #[error("stream error: {0}")]
    Stream(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Easel operations
pub type Result<T> = std::result::Result<T, EaselError>;
