use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    util::num::{decimal_to_i64, ensure_in_range, format_decimal},
};

/// Longest string, in characters, that an operation may produce.
pub const MAX_STRING_LENGTH: usize = 10_000;

/// The payload of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// An arbitrary-precision decimal number.
    Number(BigDecimal),
    /// A string of characters.
    String(String),
}

/// Represents a runtime value in the interpreter.
///
/// A value is either a number or a string, plus an optional tag. The tag is
/// opaque to the interpreter: it rides along through default operations so a
/// host hook can give values extra meaning (units, display hints and the
/// like). Values are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// The number or string.
    pub kind: ValueKind,
    /// An optional host-defined tag.
    pub tag:  Option<Rc<str>>,
}

impl From<BigDecimal> for Value {
    fn from(n: BigDecimal) -> Self {
        Self::number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::string(s)
    }
}

impl Value {
    /// Creates an untagged number.
    pub fn number(n: impl Into<BigDecimal>) -> Self {
        Self { kind: ValueKind::Number(n.into()),
               tag:  None, }
    }

    /// Creates an untagged string.
    pub fn string(s: impl Into<String>) -> Self {
        Self { kind: ValueKind::String(s.into()),
               tag:  None, }
    }

    /// `1` for true, `0` for false.
    #[must_use]
    pub fn boolean(b: bool) -> Self {
        Self::number(i64::from(b))
    }

    /// Returns the same value carrying `tag`.
    ///
    /// # Example
    /// ```
    /// use calcscript::interpreter::value::Value;
    ///
    /// let metres = Value::from(3).with_tag(Some("m".into()));
    /// assert_eq!(metres.tag.as_deref(), Some("m"));
    /// assert_eq!(metres.to_string(), "3");
    /// ```
    #[must_use]
    pub fn with_tag(mut self, tag: Option<Rc<str>>) -> Self {
        self.tag = tag;
        self
    }

    /// Whether this is a number.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.kind, ValueKind::Number(_))
    }

    /// Whether this is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.kind, ValueKind::String(_))
    }

    /// Borrows the number, or fails with `InvalidDataType`.
    ///
    /// # Errors
    /// `InvalidDataType` if the value is a string.
    pub fn as_number(&self) -> EvalResult<&BigDecimal> {
        match &self.kind {
            ValueKind::Number(n) => Ok(n),
            ValueKind::String(s) => {
                Err(ScriptError::new(ErrorKind::InvalidDataType,
                                     format!("Expected a number, found string \"{s}\"")))
            },
        }
    }

    /// Borrows the string, or fails with `InvalidDataType`.
    ///
    /// # Errors
    /// `InvalidDataType` if the value is a number.
    pub fn as_str(&self) -> EvalResult<&str> {
        match &self.kind {
            ValueKind::String(s) => Ok(s),
            ValueKind::Number(n) => {
                Err(ScriptError::new(ErrorKind::InvalidDataType,
                                     format!("Expected a string, found number {}",
                                             format_decimal(n))))
            },
        }
    }

    /// The number as an `i64`.
    ///
    /// # Errors
    /// - `InvalidDataType` for strings.
    /// - `NotSupportedOperation` for fractional numbers.
    /// - `NumberOverflow` outside the 64-bit range.
    pub fn as_integer(&self) -> EvalResult<i64> {
        decimal_to_i64(self.as_number()?)
    }

    /// Truthiness: a nonzero number or a non-empty string.
    ///
    /// # Example
    /// ```
    /// use calcscript::interpreter::value::Value;
    ///
    /// assert!(Value::from(-1).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match &self.kind {
            ValueKind::Number(n) => !n.is_zero(),
            ValueKind::String(s) => !s.is_empty(),
        }
    }

    /// `N` for numbers and `S` for strings, as used by function signatures.
    #[must_use]
    pub const fn type_letter(&self) -> char {
        match self.kind {
            ValueKind::Number(_) => 'N',
            ValueKind::String(_) => 'S',
        }
    }

    /// The string form used when a number meets a string.
    #[must_use]
    pub fn to_text(&self) -> String {
        match &self.kind {
            ValueKind::Number(n) => format_decimal(n),
            ValueKind::String(s) => s.clone(),
        }
    }

    /// Checks that a number lies within the signed 64-bit range.
    ///
    /// Strings always pass.
    ///
    /// # Errors
    /// `NumberOverflow` for out-of-range numbers.
    pub fn check_range(&self) -> EvalResult<()> {
        match &self.kind {
            ValueKind::Number(n) => ensure_in_range(n),
            ValueKind::String(_) => Ok(()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(n) => f.write_str(&format_decimal(n)),
            ValueKind::String(s) => f.write_str(s),
        }
    }
}
