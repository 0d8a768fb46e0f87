use bigdecimal::BigDecimal;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::{
        evaluator::{binary::arithmetic::not_supported, core::Interpreter},
        operator::BinaryOperator,
        value::Value,
    },
    util::num::decimal_to_i64,
};

/// Converts a shift count, which must lie in `[0, i32::MAX)`.
fn shift_count(count: i64) -> EvalResult<u32> {
    if (0..i64::from(i32::MAX)).contains(&count) {
        if let Ok(count) = u32::try_from(count) {
            return Ok(count);
        }
    }
    Err(ScriptError::new(ErrorKind::NotSupportedOperation,
                         format!("Shift count {count} is out of range")))
}

/// `value << count`; every bit is shifted out once `count` reaches 64.
const fn shift_left(value: i64, count: u32) -> i64 {
    if count >= i64::BITS { 0 } else { value << count }
}

/// Arithmetic `value >> count`, saturating to the sign once `count`
/// reaches 64.
const fn shift_right(value: i64, count: u32) -> i64 {
    if count < i64::BITS {
        value >> count
    } else if value < 0 {
        -1
    } else {
        0
    }
}

impl Interpreter {
    /// Evaluates `& | ^ << >>` on two numbers.
    ///
    /// Both operands must be integers in the signed 64-bit range. Shifts
    /// treat the left operand as a two's-complement bit pattern, so
    /// `1 << 63` is the most negative integer.
    ///
    /// # Errors
    /// - `NotSupportedOperation` for fractional operands or a bad shift
    ///   count.
    /// - `NumberOverflow` for operands outside the 64-bit range.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::BinaryOperator, value::Value},
    /// };
    ///
    /// let r = Interpreter::eval_bitwise(BinaryOperator::Shl,
    ///                                   &BigDecimal::from(1),
    ///                                   &BigDecimal::from(63)).unwrap();
    /// assert_eq!(r, Value::from(i64::MIN));
    /// ```
    pub fn eval_bitwise(op: BinaryOperator, a: &BigDecimal, b: &BigDecimal) -> EvalResult<Value> {
        let x = decimal_to_i64(a)?;
        let y = decimal_to_i64(b)?;
        let result = match op {
            BinaryOperator::BitAnd => x & y,
            BinaryOperator::BitOr => x | y,
            BinaryOperator::BitXor => x ^ y,
            BinaryOperator::Shl => shift_left(x, shift_count(y)?),
            BinaryOperator::Shr => shift_right(x, shift_count(y)?),
            _ => return Err(not_supported(op, "bitwise evaluation")),
        };
        Ok(Value::from(result))
    }
}
