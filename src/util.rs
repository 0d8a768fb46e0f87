/// Decimal helpers.
///
/// Formatting, range checks, exact floor division and remainder, and the
/// conversions between `BigDecimal`, `i64` and `f64` that the operators and
/// the `math` module rely on. Conversions that can lose information return an
/// `EvalResult` naming the failure.
pub mod num;
