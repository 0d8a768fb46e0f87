use regex::Regex;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::value::Value,
};

/// The argument types of a call as a string of type letters.
///
/// # Example
/// ```
/// use calcscript::interpreter::{module::signature::type_string, value::Value};
///
/// assert_eq!(type_string(&[Value::from(1), Value::from("a")]), "NS");
/// ```
#[must_use]
pub fn type_string(args: &[Value]) -> String {
    args.iter().map(Value::type_letter).collect()
}

/// A compiled argument signature.
///
/// The pattern is a regular expression over the letters `N` (number) and
/// `S` (string) that must match the whole type string, e.g. `N+` for one or
/// more numbers or `SNN?` for a string followed by one or two numbers. It is
/// compiled once and reused for every call.
///
/// # Example
/// ```
/// use calcscript::{
///     error::ErrorKind,
///     interpreter::{module::signature::Signature, value::Value},
/// };
///
/// let numbers = Signature::new("N+").unwrap();
/// assert!(numbers.verify("max", &[Value::from(1), Value::from(2)]).is_ok());
/// let err = numbers.verify("max", &[]).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidArgument);
/// ```
#[derive(Debug, Clone)]
pub struct Signature {
    text:    String,
    pattern: Regex,
}

impl Signature {
    /// Compiles a signature pattern.
    ///
    /// # Errors
    /// `UnknownError` if the pattern is not a valid regular expression.
    pub fn new(signature: &str) -> EvalResult<Self> {
        let pattern = Regex::new(&format!("^(?:{signature})$")).map_err(|e| {
                          ScriptError::new(ErrorKind::UnknownError,
                                           format!("Invalid signature '{signature}': {e}"))
                      })?;
        Ok(Self { text: signature.to_owned(),
                  pattern })
    }

    /// Checks call arguments against the signature.
    ///
    /// # Parameters
    /// - `function`: Function name, used in the error message.
    /// - `args`: The evaluated arguments.
    ///
    /// # Errors
    /// `InvalidArgument` if the arguments do not match.
    pub fn verify(&self, function: &str, args: &[Value]) -> EvalResult<()> {
        let actual = type_string(args);
        if self.pattern.is_match(&actual) {
            return Ok(());
        }
        Err(ScriptError::invalid_argument(format!("{function}() expects arguments matching \
                                                   '{}', got '{actual}'",
                                                  self.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(function: &str, args: &[Value], signature: &str) -> EvalResult<()> {
        Signature::new(signature)?.verify(function, args)
    }

    #[test]
    fn optional_arguments() {
        let one = [Value::from(1)];
        let two = [Value::from(1), Value::from(2)];
        let three = [Value::from(1), Value::from(2), Value::from(3)];
        assert!(verify("log", &one, "NN?").is_ok());
        assert!(verify("log", &two, "NN?").is_ok());
        assert!(verify("log", &three, "NN?").is_err());
    }

    #[test]
    fn pattern_is_anchored() {
        let args = [Value::from("s"), Value::from(1)];
        assert!(verify("left", &args, "SN").is_ok());
        assert!(verify("len", &args, "S").is_err());
        assert!(verify("alt", &args, "N|SN").is_ok());
    }

    #[test]
    fn broken_pattern_is_a_host_error() {
        let err = Signature::new("N(").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownError);
    }
}
