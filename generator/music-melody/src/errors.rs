//! Errors raised during rhythm synthesis.

use thiserror::Error;

/// Errors raised while generating a melody.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MelodyError {
    /// No rhythm primitive fits the remaining budget. Only arises from a
    /// caller-supplied length that isn't a non-negative multiple of 0.5.
    #[error("no rhythm primitive fits the remaining budget: {0}")]
    Infeasible(String),
}

/// Convenience alias for melody-generation operations.
pub type MelodyResult<T> = Result<T, MelodyError>;
