//! Error model shared by the domain and storage layers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the pantry crates.
pub type PantryResult<T> = Result<T, PantryError>;

/// Malformed user input or persisted data.
///
/// The core never retries: presentation layers re-prompt or return a
/// validation error to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A date string did not match `MM/DD/YYYY`.
    #[error("invalid date `{input}`: expected MM/DD/YYYY")]
    InvalidDate { input: String },

    /// A quantity string was not a finite decimal number.
    #[error("invalid quantity `{input}`: expected a number")]
    InvalidQuantity { input: String },

    /// A required field was blank.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// A persisted record could not be decoded.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

impl ParseError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    pub fn invalid_quantity(input: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            input: input.into(),
        }
    }

    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Failure reading or writing a backing file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record error on `{}`: {message}", .path.display())]
    Csv { path: PathBuf, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Top-level error for pantry operations.
#[derive(Debug, Error)]
pub enum PantryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PantryError {
    /// True when the failure was caused by bad input rather than IO.
    pub fn is_validation(&self) -> bool {
        matches!(self, PantryError::Parse(_))
    }
}
