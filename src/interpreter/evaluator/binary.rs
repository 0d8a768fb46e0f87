/// Dispatch of binary operations by operand types, with the hook consulted
/// first.
pub mod core;

/// `+ - * / // %` on decimals.
pub mod arithmetic;

/// `**` through floating point.
pub mod power;

/// `& | ^ << >>` on 64-bit integers.
pub mod bitwise;

/// Relational and equality operators.
pub mod comparison;

/// `and` / `or` on truthiness.
pub mod logic;

/// Concatenation, repetition and equality of strings.
pub mod string;
