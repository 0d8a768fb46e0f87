use crate::{
    error::EvalResult,
    interpreter::{
        evaluator::{binary::arithmetic::not_supported, core::Interpreter},
        operator::BinaryOperator,
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates `and` / `or` on the truthiness of two numbers.
    ///
    /// Both operands have already been evaluated; there is no short
    /// circuit. The result is `1` or `0`.
    ///
    /// # Example
    /// ```
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::BinaryOperator, value::Value},
    /// };
    ///
    /// let r = Interpreter::eval_logic(BinaryOperator::Or, false, true);
    /// assert_eq!(r.unwrap(), Value::from(1));
    /// ```
    pub fn eval_logic(op: BinaryOperator, left: bool, right: bool) -> EvalResult<Value> {
        match op {
            BinaryOperator::And => Ok(Value::boolean(left && right)),
            BinaryOperator::Or => Ok(Value::boolean(left || right)),
            _ => Err(not_supported(op, "logical evaluation")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn numbers_by_truthiness() {
        let r = Interpreter::apply_binary(BinaryOperator::And, &Value::from(-3), &Value::from(2));
        assert_eq!(r.unwrap(), Value::from(1));
        let r = Interpreter::apply_binary(BinaryOperator::Or, &Value::from(0), &Value::from(0));
        assert_eq!(r.unwrap(), Value::from(0));
        let err = Interpreter::eval_logic(BinaryOperator::Add, true, true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotSupportedOperation);
    }

    #[test]
    fn strings_are_rejected() {
        let r = Interpreter::apply_binary(BinaryOperator::And, &Value::from("x"), &Value::from(2));
        assert_eq!(r.unwrap_err().kind, ErrorKind::NotSupportedOperation);
        let r = Interpreter::apply_binary(BinaryOperator::Or, &Value::from("a"), &Value::from("b"));
        assert_eq!(r.unwrap_err().kind, ErrorKind::NotSupportedOperation);
    }
}
