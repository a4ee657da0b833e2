//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the corpus engine, providing structured
//! error types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from various system components
//! - **Output**: Structured error types with context and error chains
//! - **Error Categories**: Extraction, Configuration, Serialization, Output
//!
//! There is no fatal error category inside the structuring/search core: a
//! document whose text cannot be obtained degrades to an empty document and
//! the run continues, classification is total by construction, and malformed
//! queries are rejected locally with an explicit outcome rather than an error.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error types for the corpus structuring and search engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Upstream text provider could not produce content for a document.
    /// Never fatal to a corpus run; the pipeline logs it and degrades the
    /// document to empty content.
    #[error("extraction failed for document '{document}': {details}")]
    Extraction { document: String, details: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("validation failed for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            EngineError::Extraction { .. } => "extraction",
            EngineError::Config { .. } | EngineError::Validation { .. } => "configuration",
            EngineError::Io(_) => "io",
            EngineError::Json(_) | EngineError::Toml(_) => "serialization",
        }
    }

    /// Whether the overall corpus run should continue past this error
    pub fn is_degradable(&self) -> bool {
        matches!(self, EngineError::Extraction { .. })
    }
}
