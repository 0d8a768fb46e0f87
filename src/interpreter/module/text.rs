use bigdecimal::BigDecimal;

use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{
        lexer::parse_number,
        module::Module,
        value::{MAX_STRING_LENGTH, Value},
    },
};

builtin_functions! {
    "len"     => { signature: "S",     func: len },
    "upper"   => { signature: "S",     func: |args| Ok(Value::from(args[0].as_str()?.to_uppercase())) },
    "lower"   => { signature: "S",     func: |args| Ok(Value::from(args[0].as_str()?.to_lowercase())) },
    "trim"    => { signature: "S",     func: |args| Ok(Value::from(args[0].as_str()?.trim())) },
    "left"    => { signature: "SN",    func: left },
    "right"   => { signature: "SN",    func: right },
    "mid"     => { signature: "SNN?",  func: mid },
    "find"    => { signature: "SS",    func: find },
    "replace" => { signature: "SSS",   func: replace },
    "str"     => { signature: "N|S",   func: |args| Ok(Value::from(args[0].to_text())) },
    "num"     => { signature: "S|N",   func: num },
}

/// Builds the `text` module.
///
/// Positions are counted in characters and are 1-based: `mid(s, 1, 2)` is the
/// first two characters and `find` returns `0` when the needle is absent.
///
/// # Example
/// ```
/// use calcscript::interpreter::{module::text, value::Value};
///
/// let text = text::module();
/// let mid = text.function("mid").unwrap();
/// let args = [Value::from("calculator"), Value::from(5), Value::from(3)];
/// assert_eq!(mid(&args).unwrap(), Value::from("ula"));
/// ```
#[must_use]
pub fn module() -> Module {
    Module::new("text").install(BUILTIN_TABLE)
}

/// A character count argument, clamped at zero.
fn count(value: &Value) -> EvalResult<usize> {
    Ok(usize::try_from(value.as_integer()?.max(0)).unwrap_or(usize::MAX))
}

fn char_count(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

fn len(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::from(char_count(args[0].as_str()?)))
}

fn left(args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    Ok(Value::from(s.chars().take(count(&args[1])?).collect::<String>()))
}

fn right(args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let total = s.chars().count();
    let skip = total.saturating_sub(count(&args[1])?);
    Ok(Value::from(s.chars().skip(skip).collect::<String>()))
}

fn mid(args: &[Value]) -> EvalResult<Value> {
    let s = args[0].as_str()?;
    let start = args[1].as_integer()?;
    if start < 1 {
        return Err(ScriptError::invalid_argument("mid() start position must be at least 1"));
    }
    let skip = usize::try_from(start - 1).unwrap_or(usize::MAX);
    let take = match args.get(2) {
        Some(length) => count(length)?,
        None => usize::MAX,
    };
    Ok(Value::from(s.chars().skip(skip).take(take).collect::<String>()))
}

fn find(args: &[Value]) -> EvalResult<Value> {
    let haystack = args[0].as_str()?;
    let needle = args[1].as_str()?;
    let position = haystack.find(needle)
                           .map_or(0, |byte| char_count(&haystack[..byte]) + 1);
    Ok(Value::from(position))
}

fn replace(args: &[Value]) -> EvalResult<Value> {
    let replaced = args[0].as_str()?.replace(args[1].as_str()?, args[2].as_str()?);
    if replaced.chars().count() > MAX_STRING_LENGTH {
        return Err(ScriptError::string_overflow(MAX_STRING_LENGTH));
    }
    Ok(Value::from(replaced))
}

/// Parses a decimal string, with optional sign and surrounding blanks.
/// Numbers pass through unchanged.
fn num(args: &[Value]) -> EvalResult<Value> {
    let Ok(text) = args[0].as_str() else {
        return Ok(args[0].clone());
    };
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let parsed: Option<BigDecimal> = parse_number(digits);
    match parsed {
        Some(n) if negative => Ok(Value::number(-n)),
        Some(n) => Ok(Value::number(n)),
        None => Err(ScriptError::invalid_argument(format!("num() cannot parse \"{text}\""))),
    }
}
