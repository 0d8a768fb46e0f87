use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{ErrorKind, EvalResult, ScriptError};

/// Fractional digits kept by `/`.
pub const DIVISION_SCALE: i64 = 28;

/// `2^63` as an `f64`; integral floats below this convert through `i64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Formats a decimal in plain notation without trailing fractional zeros.
///
/// # Parameters
/// - `value`: The decimal to format.
///
/// # Returns
/// The canonical text, e.g. `2.5`, `-0.001` or `1000`.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use calcscript::util::num::format_decimal;
///
/// assert_eq!(format_decimal(&BigDecimal::from_str("2.500").unwrap()), "2.5");
/// assert_eq!(format_decimal(&BigDecimal::from_str("1e3").unwrap()), "1000");
/// assert_eq!(format_decimal(&BigDecimal::from_str("-0.0010").unwrap()), "-0.001");
/// ```
#[must_use]
pub fn format_decimal(value: &BigDecimal) -> String {
    let normalized = value.normalized();
    let (digits, scale) = normalized.as_bigint_and_exponent();
    let mut text = digits.to_string();
    if digits.is_zero() {
        return "0".to_owned();
    }
    if scale <= 0 {
        let zeros = usize::try_from(scale.unsigned_abs()).unwrap_or(0);
        text.push_str(&"0".repeat(zeros));
        return text;
    }

    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest.to_owned()),
        None => ("", text),
    };
    let scale = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX);
    let padded = if magnitude.len() <= scale {
        format!("{}{magnitude}", "0".repeat(scale - magnitude.len() + 1))
    } else {
        magnitude
    };
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{sign}{whole}.{fraction}")
}

/// Whether `value` lies within the signed 64-bit range.
#[must_use]
pub fn in_i64_range(value: &BigDecimal) -> bool {
    *value >= BigDecimal::from(i64::MIN) && *value <= BigDecimal::from(i64::MAX)
}

/// Fails with `NumberOverflow` when `value` is outside the signed 64-bit
/// range.
///
/// # Errors
/// `NumberOverflow` for out-of-range values.
pub fn ensure_in_range(value: &BigDecimal) -> EvalResult<()> {
    if in_i64_range(value) {
        Ok(())
    } else {
        Err(ScriptError::number_overflow())
    }
}

/// Converts an integral decimal to `i64`.
///
/// # Errors
/// - `NotSupportedOperation` if the value has a fractional part.
/// - `NumberOverflow` if it does not fit in 64 bits.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use calcscript::{error::ErrorKind, util::num::decimal_to_i64};
///
/// assert_eq!(decimal_to_i64(&BigDecimal::from(-7)).unwrap(), -7);
/// let err = decimal_to_i64(&BigDecimal::from_str("1.5").unwrap()).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::NotSupportedOperation);
/// ```
pub fn decimal_to_i64(value: &BigDecimal) -> EvalResult<i64> {
    if !value.is_integer() {
        return Err(ScriptError::new(ErrorKind::NotSupportedOperation,
                                    format!("{} is not an integer", format_decimal(value))));
    }
    value.to_i64().ok_or_else(ScriptError::number_overflow)
}

/// Converts a decimal to the nearest `f64`.
#[must_use]
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Converts an `f64` result back to a decimal.
///
/// Integral values below `2^63` in magnitude convert exactly; everything
/// else goes through the shortest decimal representation of the float.
///
/// # Errors
/// - `NumberOverflow` for infinities.
/// - `NotSupportedOperation` for NaN.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calcscript::{error::ErrorKind, util::num::f64_to_decimal};
///
/// assert_eq!(f64_to_decimal(1024.0).unwrap(), BigDecimal::from(1024));
/// assert_eq!(f64_to_decimal(f64::INFINITY).unwrap_err().kind, ErrorKind::NumberOverflow);
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_decimal(value: f64) -> EvalResult<BigDecimal> {
    if value.is_nan() {
        return Err(ScriptError::new(ErrorKind::NotSupportedOperation,
                                    "Result is not a number"));
    }
    if value.is_infinite() {
        return Err(ScriptError::number_overflow());
    }
    if value.fract() == 0.0 && value.abs() < TWO_POW_63 {
        return Ok(BigDecimal::from(value as i64));
    }
    BigDecimal::from_str(&format!("{value}")).map_err(|_| {
        ScriptError::new(ErrorKind::NotSupportedOperation,
                         format!("Cannot represent {value} as a decimal"))
    })
}

/// Largest integer not greater than `value`.
#[must_use]
pub fn floor(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Floor)
}

/// `value` with its fractional part dropped.
#[must_use]
pub fn trunc(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Down)
}

/// Rounds to `places` fractional digits and strips trailing zeros.
#[must_use]
pub fn round_to(value: &BigDecimal, places: i64, mode: RoundingMode) -> BigDecimal {
    value.with_scale_round(places, mode).normalized()
}

fn ensure_divisor(divisor: &BigDecimal) -> EvalResult<()> {
    if divisor.is_zero() {
        return Err(ScriptError::new(ErrorKind::DivisionByZero, "Division by zero"));
    }
    Ok(())
}

/// `a / b`, rounded half-even to [`DIVISION_SCALE`] fractional digits.
///
/// # Errors
/// `DivisionByZero` when `b` is zero.
pub fn divide(a: &BigDecimal, b: &BigDecimal) -> EvalResult<BigDecimal> {
    ensure_divisor(b)?;
    Ok(round_to(&(a / b), DIVISION_SCALE, RoundingMode::HalfEven))
}

/// Remainder with the sign of the divisor.
///
/// # Errors
/// `DivisionByZero` when `b` is zero.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calcscript::util::num::floor_modulo;
///
/// let m = |a: i64, b: i64| floor_modulo(&BigDecimal::from(a), &BigDecimal::from(b)).unwrap();
/// assert_eq!(m(10, -3), BigDecimal::from(-2));
/// assert_eq!(m(-10, 3), BigDecimal::from(2));
/// ```
pub fn floor_modulo(a: &BigDecimal, b: &BigDecimal) -> EvalResult<BigDecimal> {
    ensure_divisor(b)?;
    let remainder = a % b;
    if !remainder.is_zero() && remainder.is_negative() != b.is_negative() {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

/// `floor(a / b)`, computed exactly.
///
/// # Errors
/// `DivisionByZero` when `b` is zero.
pub fn floor_divide(a: &BigDecimal, b: &BigDecimal) -> EvalResult<BigDecimal> {
    ensure_divisor(b)?;
    let remainder = a % b;
    let quotient = trunc(&((a - &remainder) / b));
    if !remainder.is_zero() && remainder.is_negative() != b.is_negative() {
        Ok(quotient - BigDecimal::from(1))
    } else {
        Ok(quotient)
    }
}
