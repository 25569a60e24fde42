//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the corpus browser, providing structured error
//! types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from corpus loading, configuration, and clipboard access
//! - **Output**: Structured error types with context and error chains
//! - **Error Categories**: Configuration, Corpus, Clipboard
//!
//! ## Key Features
//! - Error types with detailed context per failure site
//! - Automatic error conversion and chaining
//! - Category tags for logging
//!
//! ## Usage
//! ```rust
//! use norma_search::errors::{NormaError, Result};
//!
//! fn check_acronym(name: &str) -> Result<()> {
//!     if name.trim().is_empty() {
//!         return Err(NormaError::CorpusValidation {
//!             source_name: name.to_string(),
//!             reason: "acronym must not be blank".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, NormaError>;

/// Error types for the corpus browser
#[derive(Debug, Error)]
pub enum NormaError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors for configuration fields
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Corpus file could not be read
    #[error("Failed to read corpus file {}: {source}", path.display())]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not valid JSON for the expected shape
    #[error("Failed to parse corpus file {}: {source}", path.display())]
    CorpusParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Loaded corpus violates a structural rule
    #[error("Invalid corpus '{source_name}': {reason}")]
    CorpusValidation { source_name: String, reason: String },

    /// System clipboard could not be reached or written
    #[error("Clipboard error: {details}")]
    Clipboard { details: String },
}

impl NormaError {
    /// Check if the error is recoverable (the session can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NormaError::Clipboard { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            NormaError::Config { .. } | NormaError::ValidationFailed { .. } => "configuration",
            NormaError::CorpusRead { .. }
            | NormaError::CorpusParse { .. }
            | NormaError::CorpusValidation { .. } => "corpus",
            NormaError::Clipboard { .. } => "clipboard",
        }
    }
}

// Conversion from common error types
impl From<arboard::Error> for NormaError {
    fn from(err: arboard::Error) -> Self {
        NormaError::Clipboard {
            details: err.to_string(),
        }
    }
}

// Helper macro for common error patterns
#[macro_export]
macro_rules! validation_error {
    ($field:expr, $reason:expr) => {
        $crate::errors::NormaError::ValidationFailed {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}
