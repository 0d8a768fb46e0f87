/// The closed set of error kinds.
///
/// Every failure the interpreter can report belongs to exactly one
/// [`ErrorKind`]. Hosts map kinds to user-facing messages, or silence pure
/// syntax errors while the user is still typing.
pub mod error_kind;
/// Errors raised while lexing or evaluating.
///
/// A [`ScriptError`] travels through the lexer, evaluator and statement engine
/// with `?`. It may already know where it happened (lexical errors do); the
/// run boundary fills in the location otherwise.
pub mod script_error;
/// The error record kept after a failed run.
///
/// [`ErrorInfo`] is what hosts see: it is stored as the interpreter's last
/// error and broadcast through the `ErrorOccurred` event.
pub mod error_info;

pub use error_info::ErrorInfo;
pub use error_kind::ErrorKind;
pub use script_error::ScriptError;

/// Result type used throughout the interpreter.
///
/// All lexing, evaluation and statement functions return either a value of
/// type `T` or a [`ScriptError`] describing the failure.
pub type EvalResult<T> = Result<T, ScriptError>;
