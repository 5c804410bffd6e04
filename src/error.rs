//! Error types for query evaluation.
//!
//! Everything that can go wrong while evaluating an operator tree is represented
//! by the [`DaatError`] enum. Malformed query trees (a score-producing argument
//! where a list is required, arguments in different fields) surface as errors
//! that abort the whole evaluation. A retrieval model that an operator does not
//! implement is *not* an error: the operator yields `Ok(None)` instead.
//!
//! # Examples
//!
//! ```
//! use sarissa_daat::error::{DaatError, Result};
//!
//! fn check_distance(distance: u32) -> Result<()> {
//!     if distance == 0 {
//!         return Err(DaatError::invalid_argument("#NEAR/0( )", "distance must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_distance(0).is_err());
//! ```

use std::io;

use thiserror::Error;

use crate::postings::DocId;

/// The main error type for query evaluation.
#[derive(Error, Debug)]
pub enum DaatError {
    /// An operator received an argument it cannot consume.
    #[error("Invalid argument in {operator}: {detail}")]
    InvalidArgument {
        /// Canonical rendering of the offending operator.
        operator: String,
        /// What was wrong with the argument.
        detail: String,
    },

    /// Arguments of a positional operator live in different fields.
    #[error("Arguments must be in the same field in {operator}: expected '{expected}', found '{found}'")]
    FieldMismatch {
        /// Canonical rendering of the offending operator.
        operator: String,
        /// Field of the first argument.
        expected: String,
        /// Field of the argument that disagreed.
        found: String,
    },

    /// The external-id resolver has no mapping for an internal document id.
    #[error("Unknown document: {0}")]
    UnknownDocument(DocId),

    /// Invalid evaluator configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Failures reported by external collaborators.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with DaatError.
pub type Result<T> = std::result::Result<T, DaatError>;

impl DaatError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<O: Into<String>, D: Into<String>>(operator: O, detail: D) -> Self {
        DaatError::InvalidArgument {
            operator: operator.into(),
            detail: detail.into(),
        }
    }

    /// Create a new field mismatch error.
    pub fn field_mismatch<O, E, F>(operator: O, expected: E, found: F) -> Self
    where
        O: Into<String>,
        E: Into<String>,
        F: Into<String>,
    {
        DaatError::FieldMismatch {
            operator: operator.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DaatError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DaatError::Other(msg.into())
    }

    /// Whether this error means the query tree itself is malformed.
    ///
    /// Such errors abort evaluation of the entire query; retrying cannot help.
    pub fn is_malformed_query(&self) -> bool {
        matches!(
            self,
            DaatError::InvalidArgument { .. } | DaatError::FieldMismatch { .. }
        )
    }
}
