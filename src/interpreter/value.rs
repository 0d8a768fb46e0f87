/// The runtime value type.
///
/// Defines `Value`, a number or string with an optional host tag, together
/// with the conversions and checks the evaluator applies to operands:
/// truthiness, integer extraction, the 64-bit range check and the canonical
/// text form of numbers.
pub mod core;

pub use self::core::{MAX_STRING_LENGTH, Value, ValueKind};
