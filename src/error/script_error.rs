use thiserror::Error;

use crate::{
    error::ErrorKind,
    interpreter::lexer::{SourceLocation, Token, TokenKind},
};

/// An error raised anywhere during lexing or evaluation.
///
/// The `location` is only set when the raising code knows it precisely, as
/// the lexer does for malformed literals. Everything else is located at the
/// current token when the error reaches the run boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptError {
    /// What went wrong.
    pub kind:     ErrorKind,
    /// Details for the user.
    pub message:  String,
    /// Where it went wrong, if known at the raise site.
    pub location: Option<SourceLocation>,
}

impl ScriptError {
    /// Creates an error of the given kind with a custom message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind,
               message: message.into(),
               location: None }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches a source location unless one is already set.
    #[must_use]
    pub fn or_at(mut self, location: SourceLocation) -> Self {
        self.location.get_or_insert(location);
        self
    }

    /// A required token was not found.
    pub fn missing_token(expected: &str) -> Self {
        Self::new(ErrorKind::MissingToken, format!("Expected '{expected}'"))
    }

    /// A character sequence that is not a token of the language.
    pub fn unknown_token(token: &Token) -> Self {
        Self::new(ErrorKind::UnknownToken, format!("Unknown token '{}'", token.text)).at(token.location)
    }

    /// A token appeared where the grammar does not allow it. An unknown
    /// token is reported as such.
    pub fn unexpected_token(token: &Token) -> Self {
        let message = match token.kind {
            TokenKind::Unknown => return Self::unknown_token(token),
            TokenKind::NewLine => "Unexpected end of line".to_owned(),
            TokenKind::Eof => "Unexpected end of input".to_owned(),
            _ => format!("Unexpected token '{}'", token.text),
        };
        Self::new(ErrorKind::UnexpectedToken, message).at(token.location)
    }

    /// A name could not be resolved.
    pub fn undeclared(name: &str) -> Self {
        Self::new(ErrorKind::UndeclaredIdentifier,
                  format!("'{name}' is not declared"))
    }

    /// A numeric result left the signed 64-bit range.
    pub fn number_overflow() -> Self {
        Self::new(ErrorKind::NumberOverflow,
                  "The result is outside the signed 64-bit integer range")
    }

    /// A string result exceeded the length cap.
    pub fn string_overflow(limit: usize) -> Self {
        Self::new(ErrorKind::StringOverflow,
                  format!("The resulting string would exceed {limit} characters"))
    }

    /// A module function rejected its arguments.
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, details)
    }
}

impl From<ErrorKind> for ScriptError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.description())
    }
}
