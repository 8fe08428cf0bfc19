//! This module implements the [DomainError] type.

use thiserror::Error;

/// Errors that can arise when constructing a domain or operating over it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// A buffer does not have the length the domain expects. Domains never
    /// truncate or pad: the caller owns the sizing.
    #[error("the buffer is of an unexpected size (expected {expected}, got {got})")]
    SizeMismatch { expected: usize, got: usize },

    /// No strategy can represent the requested number of points.
    #[error("no evaluation domain of size {0} is available over this field")]
    UnsupportedSize(usize),

    /// The construction parameters are unusable.
    #[error("the domain could not be constructed: {0}")]
    InvalidConfiguration(&'static str),

    /// A field inversion of zero was requested.
    #[error("division by zero while operating over the domain")]
    DivisionByZero,
}

/// Alias for `Result` with [DomainError] as the error type.
pub type Result<T> = core::result::Result<T, DomainError>;
