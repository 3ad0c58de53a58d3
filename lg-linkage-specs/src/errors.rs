//! Error types for the oracle.
//!
//! These are fatal: they stop processing of an expected-results file. A
//! rendered linkage that differs from its expectation is not an error but a
//! [`CheckFailure`](crate::runner::CheckFailure) recorded in the file report.

use lg_linkage::EngineError;
use thiserror::Error;

/// Errors that abort an expected-results run.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A suite manifest, corpus or expected-failures file is missing or unreadable.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// Malformed or absent expected-results file: bad opcode, undecodable
    /// line, no result comparison, or a file that cannot be read (line 0).
    #[error("{path}:{line}: {message}")]
    Format {
        path: String,
        line: usize,
        message: String,
    },

    /// A section left open across an incompatible line, or a line that does
    /// not fit the record it appears in.
    #[error("{path}:{line}: {message}")]
    Structure {
        path: String,
        line: usize,
        message: String,
    },

    /// The engine could not prepare a sentence.
    #[error("{path}:{line}: {source}")]
    Engine {
        path: String,
        line: usize,
        #[source]
        source: EngineError,
    },

    /// Invalid suite manifest.
    #[error("invalid suite {path}: {message}")]
    Suite { path: String, message: String },
}

impl SpecError {
    /// The expected-results line the error is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            SpecError::Format { line, .. }
            | SpecError::Structure { line, .. }
            | SpecError::Engine { line, .. } => Some(*line),
            SpecError::Load { .. } | SpecError::Suite { .. } => None,
        }
    }
}

/// Result type for oracle operations.
pub type SpecResult<T> = Result<T, SpecError>;
