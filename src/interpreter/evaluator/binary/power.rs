use bigdecimal::BigDecimal;

use crate::{
    error::EvalResult,
    interpreter::{evaluator::core::Interpreter, value::Value},
    util::num::{decimal_to_f64, f64_to_decimal},
};

impl Interpreter {
    /// Evaluates `base ** exponent`.
    ///
    /// Both operands are converted to `f64` and combined with `powf`.
    /// Integral results below `2^63` in magnitude come back exact, so
    /// `2 ** 62` is precise.
    ///
    /// # Errors
    /// - `NumberOverflow` if the result is infinite.
    /// - `NotSupportedOperation` if it is not a number, as for `(-8) ** 0.5`.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calcscript::{Interpreter, interpreter::value::Value};
    ///
    /// let r = Interpreter::eval_pow(&BigDecimal::from(2), &BigDecimal::from(10)).unwrap();
    /// assert_eq!(r, Value::from(1024));
    /// ```
    pub fn eval_pow(base: &BigDecimal, exponent: &BigDecimal) -> EvalResult<Value> {
        let result = decimal_to_f64(base).powf(decimal_to_f64(exponent));
        Ok(Value::number(f64_to_decimal(result)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pow(b: i64, e: i64) -> EvalResult<Value> {
        Interpreter::eval_pow(&BigDecimal::from(b), &BigDecimal::from(e))
    }

    #[test]
    fn large_integral_powers_are_exact() {
        assert_eq!(pow(2, 62).unwrap(), Value::from(4_611_686_018_427_387_904));
        assert_eq!(pow(-2, 3).unwrap(), Value::from(-8));
        assert_eq!(pow(10, -2).unwrap().to_string(), "0.01");
    }

    #[test]
    fn overflow_and_nan() {
        assert_eq!(pow(10, 400).unwrap_err().kind, ErrorKind::NumberOverflow);
        let half = BigDecimal::from(1) / BigDecimal::from(2);
        let nan = Interpreter::eval_pow(&BigDecimal::from(-8), &half);
        assert_eq!(nan.unwrap_err().kind, ErrorKind::NotSupportedOperation);
    }
}
