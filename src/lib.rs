//! # calcscript
//!
//! calcscript is an embeddable interpreter for a small, line-oriented
//! calculator scripting language. Scripts work with arbitrary-precision
//! decimal numbers and strings, and support variables, `if` / `elif` /
//! `else`, `for` and `repeat` loops, and functions supplied by modules.
//! Hosts observe execution through events and can override operators.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{ErrorInfo, ErrorKind},
    interpreter::{lexer::SourceLocation, value::Value},
};

/// Error kinds, the error type raised during execution and the report
/// produced when a run fails.
///
/// # Responsibilities
/// - Defines one kind per failure mode, from syntax errors to overflows.
/// - Carries messages and, where known, the source location of the failure.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Line buffering for interactive sessions.
///
/// Holds back REPL input while a compound statement is still open.
pub mod interactive;
/// Orchestrates script execution.
///
/// Ties together the lexer, the evaluators, the statement engine, modules
/// and the host-facing event and hook interfaces.
pub mod interpreter;
/// Decimal helpers shared by the evaluators and the bundled modules.
///
/// # Responsibilities
/// - Range checks and conversions between decimals, `i64` and `f64`.
/// - Rounding, flooring and the floored division family.
pub mod util;

pub use interpreter::evaluator::core::Interpreter;

/// Runs a script on a fresh interpreter with the bundled modules.
///
/// # Returns
/// The value of the last expression statement, or `None` if the script
/// produced no output.
///
/// # Errors
/// The report of the failure that stopped the script.
///
/// # Examples
/// ```
/// use calcscript::{evaluate, interpreter::value::Value};
///
/// let result = evaluate("x = 2\nx * 21").unwrap();
/// assert_eq!(result, Some(Value::from(42)));
///
/// // 'y' is not defined
/// let error = evaluate("y + 1").unwrap_err();
/// assert_eq!(error.to_string(), "error[UndeclaredIdentifier] at 1:1: 'y' is not declared");
/// ```
pub fn evaluate(source: &str) -> Result<Option<Value>, ErrorInfo> {
    let last = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&last);

    let mut interpreter = Interpreter::with_default_modules();
    interpreter.subscribe(move |event| {
                   if let Some(value) = event.output() {
                       *sink.borrow_mut() = Some(value.clone());
                   }
               });
    interpreter.set_source(source);

    if interpreter.run() {
        return Ok(last.take());
    }
    let unknown = || ErrorInfo::from_error(ErrorKind::UnknownError.into(), SourceLocation::default());
    Err(interpreter.last_error().cloned().unwrap_or_else(unknown))
}
