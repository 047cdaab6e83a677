//! Error types for dictionary operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by fallible dictionary operations.
///
/// A key that is absent on `search` or `delete` is not an error.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Inconsistent creation flags or policy, a datum whose shape the active policy
    /// rejects, an export buffer smaller than the dictionary, or an operation the
    /// dictionary's mode does not support.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A clone or an allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self { Error::OutOfMemory }
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, Error>;
