//! Error kinds surfaced by the kernel.
//!
//! Parsing and domain-range failures are programmer/data errors: they
//! propagate to the caller rather than being recovered internally.

use thiserror::Error;

/// Errors raised while parsing or constructing theory values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// A note, interval, chord, or roman-numeral string did not match its grammar.
    #[error("parse error: {0}")]
    Parse(String),
    /// A value was requested outside its legal domain (e.g. a quality step
    /// beyond `{dd..AA}`, or an unrecognized roman numeral for the mode).
    #[error("domain range error: {0}")]
    DomainRange(String),
}

/// Convenience alias for kernel operations.
pub type TheoryResult<T> = Result<T, TheoryError>;
