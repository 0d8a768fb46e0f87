/// Binary operator evaluation logic.
///
/// Handles the default semantics of every binary operator: decimal
/// arithmetic, bitwise operations on 64-bit integers, comparisons, logical
/// operators and the string operations, with the operator hook consulted
/// first.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements `+`, `-`, `~` and `not`, with the operator hook consulted
/// first.
pub mod unary;

/// The interpreter and its run loop.
///
/// Contains the `Interpreter` type, its public API, the clause record and
/// the token helpers shared by expressions and statements.
pub mod core;

/// Expression evaluation.
///
/// A precedence-climbing evaluator that consumes tokens straight from the
/// lexer and produces a value, without building a tree.
pub mod expression;

/// Identifier resolution and module function calls.
///
/// Resolves names against variables, module constants and module functions,
/// evaluates argument lists and guards assignments to reserved names.
pub mod function;
