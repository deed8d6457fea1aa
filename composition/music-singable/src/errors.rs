//! Errors raised while traversing a composition graph.

use music_theory::TheoryError;
use thiserror::Error;

/// Errors raised while singing (rendering) a [`crate::Singable`] into `Key`s.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SingableError {
    /// A pitch transform (transpose, bound, harmonize) produced an invalid note.
    #[error("note arithmetic failed: {0}")]
    Theory(#[from] TheoryError),
    /// An arpeggio pattern key fell at a time with no overlapping chord key.
    #[error("arpeggio pattern key at time {at} has no overlapping chord tone")]
    EmptyChordWindow { at: f64 },
    /// A selector was built with no candidate functions to dispatch to.
    #[error("selector has no functions to choose from")]
    EmptyFuncs,
}

/// Convenience alias for composition-graph operations.
pub type SingableResult<T> = Result<T, SingableError>;
