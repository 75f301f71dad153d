//! Error types for evidence printing.

use crate::bed::BedError;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading, filtering or writing evidence.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Bad user input detected before any record is written.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported evidence type '{type_name}' (expected one of: {supported})")]
    UnsupportedEvidenceType {
        type_name: String,
        supported: String,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Mixed evidence kinds: run is {expected}, found {found}")]
    MixedEvidenceKinds {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A broken collaborator, never user error.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The output was written but could not be finalized.
    #[error("Failed to finalize output {path}: {source}")]
    Finalize {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Interval file error: {0}")]
    Bed(#[from] BedError),
}

pub type Result<T> = std::result::Result<T, EvidenceError>;

impl EvidenceError {
    /// Returns true for errors that are reported before any output exists.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            EvidenceError::Config(_) | EvidenceError::UnsupportedEvidenceType { .. }
        )
    }
}
