//! Error types for the serializer layer.

use music_singable::SingableError;
use thiserror::Error;

/// Failures raised while rendering a composition graph into MIDI events or
/// a text score.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Rendering the underlying composition graph failed.
    #[error("rendering the composition graph failed: {0}")]
    Singable(#[from] SingableError),
    /// A note or rest had a duration with no lilypond-style length token.
    #[error("duration {0} beats has no length notation")]
    UnsupportedDuration(f64),
}

/// Shorthand for `Result<T, ApiError>`.
pub type ApiResult<T> = Result<T, ApiError>;
