use bigdecimal::BigDecimal;
use num_traits::{Signed, ToPrimitive};

use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{
        evaluator::{binary::arithmetic::not_supported, core::Interpreter},
        operator::BinaryOperator,
        value::{MAX_STRING_LENGTH, Value},
    },
    util::num::trunc,
};

impl Interpreter {
    /// Evaluates a binary operator on two strings.
    ///
    /// Only `+` (concatenation) and the equality operators are defined.
    ///
    /// # Errors
    /// - `StringOverflow` if the concatenation exceeds
    ///   [`MAX_STRING_LENGTH`] characters.
    /// - `NotSupportedOperation` for every other operator.
    pub fn eval_string(op: BinaryOperator, a: &str, b: &str) -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => {
                if a.chars().count() + b.chars().count() > MAX_STRING_LENGTH {
                    return Err(ScriptError::string_overflow(MAX_STRING_LENGTH));
                }
                Ok(Value::string(format!("{a}{b}")))
            },
            BinaryOperator::Equal => Ok(Value::boolean(a == b)),
            BinaryOperator::NotEqual => Ok(Value::boolean(a != b)),
            _ => Err(not_supported(op, "strings")),
        }
    }

    /// Repeats `s` as many times as the integer part of `count`.
    ///
    /// Negative counts give the empty string.
    ///
    /// # Errors
    /// `StringOverflow` if the result would exceed [`MAX_STRING_LENGTH`]
    /// characters.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calcscript::{Interpreter, interpreter::value::Value};
    ///
    /// let r = Interpreter::eval_repeat("ab", &BigDecimal::from(3)).unwrap();
    /// assert_eq!(r, Value::from("ababab"));
    /// ```
    pub fn eval_repeat(s: &str, count: &BigDecimal) -> EvalResult<Value> {
        let count = trunc(count);
        if s.is_empty() || count.is_negative() {
            return Ok(Value::string(""));
        }
        let most = MAX_STRING_LENGTH / s.chars().count();
        match count.to_usize() {
            Some(times) if times <= most => Ok(Value::string(s.repeat(times))),
            _ => Err(ScriptError::string_overflow(MAX_STRING_LENGTH)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn repetition_cap() {
        let ok = Interpreter::eval_repeat("x", &BigDecimal::from(10_000)).unwrap();
        assert_eq!(ok.to_string().len(), 10_000);
        let err = Interpreter::eval_repeat("x", &BigDecimal::from(10_001)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StringOverflow);
        let err = Interpreter::eval_repeat("ab", &BigDecimal::from(5_001)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StringOverflow);
    }

    #[test]
    fn repetition_truncates_the_count() {
        let r = Interpreter::eval_repeat("ab", &BigDecimal::from_str("2.9").unwrap()).unwrap();
        assert_eq!(r, Value::from("abab"));
        let r = Interpreter::eval_repeat("ab", &BigDecimal::from(-2)).unwrap();
        assert_eq!(r, Value::from(""));
    }

    #[test]
    fn string_operators() {
        assert_eq!(Interpreter::eval_string(BinaryOperator::NotEqual, "a", "b").unwrap(),
                   Value::from(1));
        let err = Interpreter::eval_string(BinaryOperator::Sub, "a", "b").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotSupportedOperation);
        let err = Interpreter::eval_string(BinaryOperator::And, "a", "b").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotSupportedOperation);
    }

    #[test]
    fn concatenation_cap() {
        let half = "y".repeat(5_000);
        assert!(Interpreter::eval_string(BinaryOperator::Add, &half, &half).is_ok());
        let err = Interpreter::eval_string(BinaryOperator::Add, &half, &format!("{half}y"));
        assert_eq!(err.unwrap_err().kind, ErrorKind::StringOverflow);
    }
}
