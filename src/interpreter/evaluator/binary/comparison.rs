use std::cmp::Ordering;

use crate::{
    error::EvalResult,
    interpreter::{
        evaluator::{binary::arithmetic::not_supported, core::Interpreter},
        operator::BinaryOperator,
        value::Value,
    },
};

impl Interpreter {
    /// Maps an ordering between two numbers to the `1`/`0` result of a
    /// comparison operator.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use calcscript::{
    ///     Interpreter,
    ///     interpreter::{operator::BinaryOperator, value::Value},
    /// };
    ///
    /// let r = Interpreter::eval_comparison(BinaryOperator::LessEqual, Ordering::Equal);
    /// assert_eq!(r.unwrap(), Value::from(1));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, ordering: Ordering) -> EvalResult<Value> {
        let holds = match op {
            BinaryOperator::Equal => ordering == Ordering::Equal,
            BinaryOperator::NotEqual => ordering != Ordering::Equal,
            BinaryOperator::Less => ordering == Ordering::Less,
            BinaryOperator::Greater => ordering == Ordering::Greater,
            BinaryOperator::LessEqual => ordering != Ordering::Greater,
            BinaryOperator::GreaterEqual => ordering != Ordering::Less,
            _ => return Err(not_supported(op, "comparison")),
        };
        Ok(Value::boolean(holds))
    }
}
