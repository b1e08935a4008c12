//! Error types for platform detection.

use std::path::PathBuf;

/// Errors that can occur while gathering inputs for detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading configuration or writing generated sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A symbol name is not a valid preprocessor identifier.
    #[error("invalid symbol name '{name}'")]
    InvalidSymbol {
        /// The rejected name.
        name: String,
    },

    /// A target triple could not be parsed.
    #[error("invalid target triple '{triple}': {detail}")]
    InvalidTriple {
        /// The rejected triple.
        triple: String,
        /// Why it was rejected.
        detail: String,
    },

    /// A required environment variable is absent.
    #[error("environment variable {name} is not set")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },

    /// A configuration value is out of range.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue {
        /// The key or variable being set.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Result type for detection operations.
pub type Result<T> = std::result::Result<T, DetectError>;
