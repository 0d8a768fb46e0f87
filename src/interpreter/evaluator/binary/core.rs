use crate::{
    error::EvalResult,
    interpreter::{
        evaluator::core::Interpreter,
        operator::BinaryOperator,
        value::{Value, ValueKind},
    },
};

impl Interpreter {
    /// Applies a binary operator, giving the operator hook the first say.
    ///
    /// The operator is counted in the run statistics whether or not the hook
    /// handles it.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The hook's value if it returned one, otherwise the default result.
    ///
    /// # Example
    /// ```
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::BinaryOperator, value::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new();
    /// let sum = interpreter.eval_binary(BinaryOperator::Add, &Value::from(3), &Value::from(4));
    /// assert_eq!(sum.unwrap(), Value::from(7));
    /// assert_eq!(interpreter.stats().operators["+"], 1);
    /// ```
    pub fn eval_binary(&mut self,
                       op: BinaryOperator,
                       left: &Value,
                       right: &Value)
                       -> EvalResult<Value> {
        self.stats.count_operator(op.symbol());
        if let Some(hook) = &self.hook {
            if let Some(value) = hook.binary(op, left, right)? {
                return Ok(value);
            }
        }
        Self::apply_binary(op, left, right)
    }

    /// The default semantics of a binary operator.
    ///
    /// Two numbers use decimal arithmetic. A number and a string multiplied
    /// together repeat the string. For any other mix the number is turned
    /// into its canonical text and the string rules apply. The result takes
    /// the left operand's tag, or the right one's if the left has none.
    ///
    /// # Errors
    /// Whatever the selected operation raises; see the individual handlers.
    ///
    /// # Example
    /// ```
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::BinaryOperator, value::Value},
    /// };
    ///
    /// let joined = Interpreter::apply_binary(BinaryOperator::Add, &Value::from("n="), &Value::from(5));
    /// assert_eq!(joined.unwrap(), Value::from("n=5"));
    /// ```
    pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let tag = left.tag.clone().or_else(|| right.tag.clone());
        let result = match (&left.kind, &right.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Self::eval_numeric(op, a, b)?,
            (ValueKind::Number(n), ValueKind::String(s))
            | (ValueKind::String(s), ValueKind::Number(n))
                if op == BinaryOperator::Mul =>
            {
                Self::eval_repeat(s, n)?
            },
            _ => Self::eval_string(op, &left.to_text(), &right.to_text())?,
        };
        Ok(result.with_tag(tag))
    }
}
