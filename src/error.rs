//! Domain errors for the store, the generator and the login gate.
//!
//! Application-level code wraps these in `anyhow::Error`.

use std::io;
use thiserror::Error;

/// Errors raised by the credential store and its helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// A value was rejected at the call boundary.
    #[error("{0}")]
    Validation(String),
    /// A stored line did not split into the expected number of fields.
    #[error("malformed record on line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
