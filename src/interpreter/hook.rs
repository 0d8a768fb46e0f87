use crate::{
    error::EvalResult,
    interpreter::{
        operator::{BinaryOperator, UnaryOperator},
        value::Value,
    },
};

/// A host strategy consulted before the default operator semantics.
///
/// Returning `Ok(Some(value))` replaces the default result, `Ok(None)` falls
/// through to it, and an error aborts the run. Both methods default to
/// falling through, so an implementation only overrides what it needs.
///
/// # Example
/// ```
/// use calcscript::{
///     Interpreter,
///     error::EvalResult,
///     interpreter::{hook::OperatorHook, operator::BinaryOperator, value::Value},
/// };
///
/// struct Concat;
///
/// impl OperatorHook for Concat {
///     fn binary(&self, op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Option<Value>> {
///         if op == BinaryOperator::Add && left.is_number() && right.is_number() {
///             return Ok(Some(Value::from(format!("{left}{right}"))));
///         }
///         Ok(None)
///     }
/// }
///
/// let mut interpreter = Interpreter::new();
/// interpreter.set_hook(Box::new(Concat));
/// interpreter.set_source("x = 1 + 2");
/// assert!(interpreter.run());
/// assert_eq!(interpreter.vars["x"], Value::from("12"));
/// ```
pub trait OperatorHook {
    /// Called before a unary operator is applied.
    ///
    /// # Errors
    /// Any error aborts the current run.
    fn unary(&self, op: UnaryOperator, operand: &Value) -> EvalResult<Option<Value>> {
        let _ = (op, operand);
        Ok(None)
    }

    /// Called before a binary operator is applied.
    ///
    /// # Errors
    /// Any error aborts the current run.
    fn binary(&self, op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Option<Value>> {
        let _ = (op, left, right);
        Ok(None)
    }
}
