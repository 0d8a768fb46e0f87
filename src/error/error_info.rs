use thiserror::Error;

use crate::{
    error::{ErrorKind, ScriptError},
    interpreter::lexer::SourceLocation,
};

/// The record of a failed run.
///
/// Exactly one `ErrorInfo` is produced per failed run. The interpreter keeps
/// it as its last error until the next run starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error[{kind}] at {location}: {message}")]
pub struct ErrorInfo {
    /// The error kind.
    pub kind:     ErrorKind,
    /// The error message.
    pub message:  String,
    /// Where the error happened.
    pub location: SourceLocation,
}

impl ErrorInfo {
    /// Builds the record from a raised error, using `fallback` when the error
    /// did not carry its own location.
    #[must_use]
    pub fn from_error(error: ScriptError, fallback: SourceLocation) -> Self {
        Self { kind:     error.kind,
               message:  error.message,
               location: error.location.unwrap_or(fallback), }
    }
}
