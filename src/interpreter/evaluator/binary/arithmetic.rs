use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::{evaluator::core::Interpreter, operator::BinaryOperator, value::Value},
    util::num::{divide, floor_divide, floor_modulo},
};

impl Interpreter {
    /// Evaluates a binary operator on two numbers.
    ///
    /// `+`, `-` and `*` are exact. `/` keeps 28 fractional digits, rounding
    /// half to even. `//` floors the quotient and `%` takes the sign of the
    /// divisor, so `a == b * (a // b) + a % b` always holds. The remaining
    /// operators are routed to their own handlers.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `a`: Left operand.
    /// - `b`: Right operand.
    ///
    /// # Returns
    /// The untagged result.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calcscript::{Interpreter, interpreter::operator::BinaryOperator};
    ///
    /// let a = BigDecimal::from(-7);
    /// let b = BigDecimal::from(2);
    /// let q = Interpreter::eval_numeric(BinaryOperator::FloorDiv, &a, &b).unwrap();
    /// assert_eq!(q.to_string(), "-4");
    /// ```
    pub fn eval_numeric(op: BinaryOperator, a: &BigDecimal, b: &BigDecimal) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, FloorDiv, Greater, GreaterEqual, Less,
            LessEqual, Mod, Mul, NotEqual, Or, Pow, Shl, Shr, Sub,
        };

        match op {
            Add => Ok(Value::number(a + b)),
            Sub => Ok(Value::number(a - b)),
            Mul => Ok(Value::number(a * b)),
            Div => Ok(Value::number(divide(a, b)?)),
            FloorDiv => Ok(Value::number(floor_divide(a, b)?)),
            Mod => Ok(Value::number(floor_modulo(a, b)?)),
            Pow => Self::eval_pow(a, b),
            BitAnd | BitOr | BitXor | Shl | Shr => Self::eval_bitwise(op, a, b),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, a.cmp(b))
            },
            And | Or => Self::eval_logic(op, !a.is_zero(), !b.is_zero()),
        }
    }
}

/// Error for an operator routed to a handler that does not implement it.
pub(crate) fn not_supported(op: BinaryOperator, operands: &str) -> ScriptError {
    ScriptError::new(ErrorKind::NotSupportedOperation,
                     format!("Operator '{op}' is not supported for {operands}"))
}
