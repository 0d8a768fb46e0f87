use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::{
        evaluator::core::Interpreter,
        operator::UnaryOperator,
        value::{Value, ValueKind},
    },
};

impl Interpreter {
    /// Applies a unary operator, giving the operator hook the first say.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `operand`: Its operand.
    ///
    /// # Returns
    /// The hook's value if it returned one, otherwise the default result.
    pub fn eval_unary(&mut self, op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
        self.stats.count_operator(op.symbol());
        if let Some(hook) = &self.hook {
            if let Some(value) = hook.unary(op, operand)? {
                return Ok(value);
            }
        }
        Self::apply_unary(op, operand)
    }

    /// The default semantics of a unary operator.
    ///
    /// Supported operators:
    /// - `Plus` / `Minus`: identity and negation, numbers only.
    /// - `BitNot`: bitwise complement of a 64-bit integer.
    /// - `Not`: `1` if the operand is falsy, `0` otherwise. Works for
    ///   strings too.
    ///
    /// The result keeps the operand's tag.
    ///
    /// # Errors
    /// - `InvalidDataType` for a string operand of `+`, `-` or `~`.
    /// - `NotSupportedOperation` / `NumberOverflow` when `~` gets a
    ///   non-integer or an out-of-range number.
    ///
    /// # Example
    /// ```
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::UnaryOperator, value::Value},
    /// };
    ///
    /// let v = Interpreter::apply_unary(UnaryOperator::BitNot, &Value::from(0)).unwrap();
    /// assert_eq!(v, Value::from(-1));
    ///
    /// let v = Interpreter::apply_unary(UnaryOperator::Not, &Value::from("")).unwrap();
    /// assert_eq!(v, Value::from(1));
    /// ```
    pub fn apply_unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
        let result = match (op, &operand.kind) {
            (UnaryOperator::Not, _) => Value::boolean(!operand.is_truthy()),
            (UnaryOperator::Plus, ValueKind::Number(n)) => Value::number(n.clone()),
            (UnaryOperator::Minus, ValueKind::Number(n)) => Value::number(-n),
            (UnaryOperator::BitNot, ValueKind::Number(_)) => Value::from(!operand.as_integer()?),
            (_, ValueKind::String(_)) => {
                return Err(ScriptError::new(ErrorKind::InvalidDataType,
                                            format!("Operator '{op}' needs a number")));
            },
        };
        Ok(result.with_tag(operand.tag.clone()))
    }
}
