use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{Signed, Zero};

use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{module::Module, value::Value},
    util::num::{
        DIVISION_SCALE, decimal_to_f64, decimal_to_i64, f64_to_decimal, floor, round_to, trunc,
    },
};

/// Fractional digits kept by functions computed in floating point.
pub const FLOAT_SCALE: i64 = 15;

/// Largest number of places `round` accepts on either side of the point.
const MAX_ROUND_PLACES: i64 = DIVISION_SCALE;

/// Largest argument accepted by `fact`.
const MAX_FACTORIAL: i64 = 1000;

const PI: &str = "3.1415926535897932384626433833";
const E: &str = "2.7182818284590452353602874714";

builtin_functions! {
    "abs"   => { signature: "N",   func: abs },
    "sign"  => { signature: "N",   func: sign },
    "sqrt"  => { signature: "N",   func: sqrt },
    "exp"   => { signature: "N",   func: |args| float_fn(args, f64::exp) },
    "ln"    => { signature: "N",   func: ln },
    "log"   => { signature: "NN?", func: log },
    "floor" => { signature: "N",   func: |args| Ok(Value::number(floor(args[0].as_number()?))) },
    "ceil"  => { signature: "N",   func: ceil },
    "round" => { signature: "NN?", func: round },
    "trunc" => { signature: "N",   func: |args| Ok(Value::number(trunc(args[0].as_number()?))) },
    "min"   => { signature: "N+",  func: |args| extremum(args, |a, b| a < b) },
    "max"   => { signature: "N+",  func: |args| extremum(args, |a, b| a > b) },
    "clamp" => { signature: "NNN", func: clamp },
    "fact"  => { signature: "N",   func: fact },
    "sin"   => { signature: "N",   func: |args| float_fn(args, |x| x.to_radians().sin()) },
    "cos"   => { signature: "N",   func: |args| float_fn(args, |x| x.to_radians().cos()) },
    "tan"   => { signature: "N",   func: |args| float_fn(args, |x| x.to_radians().tan()) },
    "asin"  => { signature: "N",   func: |args| inverse_trig(args, f64::asin) },
    "acos"  => { signature: "N",   func: |args| inverse_trig(args, f64::acos) },
    "atan"  => { signature: "N",   func: |args| float_fn(args, |x| x.atan().to_degrees()) },
    "atan2" => { signature: "NN",  func: atan2 },
    "gcd"   => { signature: "NN",  func: gcd },
    "lcm"   => { signature: "NN",  func: lcm },
}

/// Builds the `math` module: the constants `pi` and `e` plus every function
/// in the builtin table.
///
/// Angles are in degrees. Functions computed in floating point round their
/// results half away from zero to [`FLOAT_SCALE`] fractional digits, so
/// `sin(30)` is exactly `0.5`.
///
/// # Example
/// ```
/// use calcscript::interpreter::{module::math, value::Value};
///
/// let math = math::module();
/// let sin = math.function("sin").unwrap();
/// assert_eq!(sin(&[Value::from(30)]).unwrap().to_string(), "0.5");
/// ```
#[must_use]
pub fn module() -> Module {
    let mut math = Module::new("math");
    for (name, digits) in [("pi", PI), ("e", E)] {
        if let Ok(value) = BigDecimal::from_str(digits) {
            math = math.with_constant(name, Value::number(value));
        }
    }
    math.install(BUILTIN_TABLE)
}

fn float_result(value: f64) -> EvalResult<Value> {
    let decimal = f64_to_decimal(value)?;
    Ok(Value::number(round_to(&decimal, FLOAT_SCALE, RoundingMode::HalfUp)))
}

fn float_fn(args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    float_result(f(decimal_to_f64(args[0].as_number()?)))
}

fn abs(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::number(args[0].as_number()?.abs()))
}

fn sign(args: &[Value]) -> EvalResult<Value> {
    let n = args[0].as_number()?;
    let sign = if n.is_zero() {
        0
    } else if n.is_negative() {
        -1
    } else {
        1
    };
    Ok(Value::from(sign))
}

fn sqrt(args: &[Value]) -> EvalResult<Value> {
    let n = args[0].as_number()?;
    if n.is_negative() {
        return Err(ScriptError::invalid_argument("sqrt() of a negative number"));
    }
    let root = n.sqrt().unwrap_or_default();
    Ok(Value::number(round_to(&root, DIVISION_SCALE, RoundingMode::HalfEven)))
}

fn positive(args: &[Value], index: usize, function: &str) -> EvalResult<f64> {
    let n = args[index].as_number()?;
    if !n.is_positive() {
        return Err(ScriptError::invalid_argument(format!("{function}() needs a positive argument")));
    }
    Ok(decimal_to_f64(n))
}

fn ln(args: &[Value]) -> EvalResult<Value> {
    float_result(positive(args, 0, "ln")?.ln())
}

fn log(args: &[Value]) -> EvalResult<Value> {
    let x = positive(args, 0, "log")?;
    if args.len() == 1 {
        return float_result(x.log10());
    }
    let base = positive(args, 1, "log")?;
    if (base - 1.0).abs() < f64::EPSILON {
        return Err(ScriptError::invalid_argument("log() base cannot be 1"));
    }
    float_result(x.ln() / base.ln())
}

fn ceil(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::number(args[0].as_number()?.with_scale_round(0, RoundingMode::Ceiling)))
}

fn round(args: &[Value]) -> EvalResult<Value> {
    let places = match args.get(1) {
        Some(places) => places.as_integer()?,
        None => 0,
    };
    if !(-MAX_ROUND_PLACES..=MAX_ROUND_PLACES).contains(&places) {
        let details = format!("round() places must be between -{MAX_ROUND_PLACES} and {MAX_ROUND_PLACES}");
        return Err(ScriptError::invalid_argument(details));
    }
    Ok(Value::number(round_to(args[0].as_number()?, places, RoundingMode::HalfUp)))
}

fn extremum(args: &[Value], better: fn(&BigDecimal, &BigDecimal) -> bool) -> EvalResult<Value> {
    let mut best = args[0].as_number()?;
    for arg in &args[1..] {
        let n = arg.as_number()?;
        if better(n, best) {
            best = n;
        }
    }
    Ok(Value::number(best.clone()))
}

fn clamp(args: &[Value]) -> EvalResult<Value> {
    let value = args[0].as_number()?;
    let low = args[1].as_number()?;
    let high = args[2].as_number()?;
    if low > high {
        return Err(ScriptError::invalid_argument("clamp() lower bound exceeds upper bound"));
    }
    Ok(Value::number(Ord::clamp(value, low, high).clone()))
}

fn fact(args: &[Value]) -> EvalResult<Value> {
    let n = args[0].as_number()?;
    if n.is_negative() || !n.is_integer() {
        return Err(ScriptError::invalid_argument("fact() needs a non-negative integer"));
    }
    let n = decimal_to_i64(n)?;
    if n > MAX_FACTORIAL {
        return Err(ScriptError::number_overflow());
    }
    let product = (2..=n).fold(BigDecimal::from(1), |acc, k| acc * BigDecimal::from(k));
    Ok(Value::number(product))
}

fn inverse_trig(args: &[Value], f: fn(f64) -> f64) -> EvalResult<Value> {
    let x = decimal_to_f64(args[0].as_number()?);
    if !(-1.0..=1.0).contains(&x) {
        return Err(ScriptError::invalid_argument("Argument must be between -1 and 1"));
    }
    float_result(f(x).to_degrees())
}

fn atan2(args: &[Value]) -> EvalResult<Value> {
    let y = decimal_to_f64(args[0].as_number()?);
    let x = decimal_to_f64(args[1].as_number()?);
    float_result(y.atan2(x).to_degrees())
}

fn integer_pair(args: &[Value]) -> EvalResult<(i128, i128)> {
    Ok((i128::from(args[0].as_integer()?), i128::from(args[1].as_integer()?)))
}

const fn euclid(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn integer_result(n: i128) -> EvalResult<Value> {
    i64::try_from(n).map(Value::from)
                    .map_err(|_| ScriptError::number_overflow())
}

fn gcd(args: &[Value]) -> EvalResult<Value> {
    let (a, b) = integer_pair(args)?;
    integer_result(euclid(a, b))
}

fn lcm(args: &[Value]) -> EvalResult<Value> {
    let (a, b) = integer_pair(args)?;
    if a == 0 || b == 0 {
        return Ok(Value::from(0));
    }
    integer_result((a / euclid(a, b) * b).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
        let math = module();
        let function = math.function(name).unwrap();
        function(args)
    }

    fn text(name: &str, args: &[Value]) -> String {
        call(name, args).unwrap().to_string()
    }

    fn n(text: &str) -> Value {
        Value::number(BigDecimal::from_str(text).unwrap())
    }

    #[test]
    fn degrees_and_rounding() {
        assert_eq!(text("sin", &[n("30")]), "0.5");
        assert_eq!(text("cos", &[n("90")]), "0");
        assert_eq!(text("tan", &[n("45")]), "1");
        assert_eq!(text("asin", &[n("1")]), "90");
        assert_eq!(text("atan2", &[n("1"), n("1")]), "45");
    }

    #[test]
    fn every_float_function_is_rounded() {
        assert_eq!(text("acos", &[n("0.5")]), "60");
        assert_eq!(text("atan", &[n("1")]), "45");
        assert_eq!(text("exp", &[n("1")]), "2.718281828459045");
        assert_eq!(text("ln", &[n("1")]), "0");
        assert_eq!(text("log", &[n("1000")]), "3");
    }

    #[test]
    fn round_places_are_bounded() {
        assert_eq!(text("round", &[n("1234"), n("-2")]), "1200");
        assert_eq!(text("round", &[n("0.125"), n("28")]), "0.125");
        let err = call("round", &[n("1.5"), n("100000000")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        let err = call("round", &[n("1.5"), n("-29")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn inverse_trig_domain() {
        assert_eq!(call("acos", &[n("2")]).unwrap_err().kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn logarithms() {
        assert_eq!(text("log", &[n("1000")]), "3");
        assert_eq!(text("log", &[n("8"), n("2")]), "3");
        assert_eq!(call("ln", &[n("0")]).unwrap_err().kind, ErrorKind::InvalidArgument);
        assert_eq!(call("log", &[n("1"), n("2"), n("3")]).unwrap_err().kind,
                   ErrorKind::InvalidArgument);
    }

    #[test]
    fn rounding_family() {
        assert_eq!(text("floor", &[n("-2.5")]), "-3");
        assert_eq!(text("ceil", &[n("2.1")]), "3");
        assert_eq!(text("trunc", &[n("-2.7")]), "-2");
        assert_eq!(text("round", &[n("2.5")]), "3");
        assert_eq!(text("round", &[n("-2.5")]), "-3");
        assert_eq!(text("round", &[n("3.14159"), n("2")]), "3.14");
    }

    #[test]
    fn factorial() {
        assert_eq!(text("fact", &[n("0")]), "1");
        assert_eq!(text("fact", &[n("20")]), "2432902008176640000");
        assert_eq!(call("fact", &[n("-1")]).unwrap_err().kind, ErrorKind::InvalidArgument);
        assert_eq!(call("fact", &[n("1.5")]).unwrap_err().kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn aggregates() {
        assert_eq!(text("min", &[n("3"), n("-1"), n("2")]), "-1");
        assert_eq!(text("max", &[n("3")]), "3");
        assert_eq!(text("clamp", &[n("15"), n("0"), n("10")]), "10");
        assert_eq!(call("clamp", &[n("1"), n("5"), n("0")]).unwrap_err().kind,
                   ErrorKind::InvalidArgument);
    }

    #[test]
    fn integer_helpers() {
        assert_eq!(text("gcd", &[n("12"), n("-18")]), "6");
        assert_eq!(text("lcm", &[n("4"), n("6")]), "12");
        assert_eq!(text("lcm", &[n("0"), n("6")]), "0");
        assert_eq!(text("sign", &[n("-0.5")]), "-1");
        assert_eq!(text("abs", &[n("-0.5")]), "0.5");
    }

    #[test]
    fn square_roots() {
        assert_eq!(text("sqrt", &[n("2.25")]), "1.5");
        assert_eq!(text("sqrt", &[n("2")]), "1.4142135623730950488016887242");
        assert_eq!(call("sqrt", &[n("-4")]).unwrap_err().kind, ErrorKind::InvalidArgument);
    }
}
