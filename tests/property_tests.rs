use calcscript::{Interpreter, evaluate, interpreter::value::Value};
use proptest::prelude::*;

fn value_of(source: &str) -> String {
    match evaluate(source) {
        Ok(Some(value)) => value.to_string(),
        other => panic!("{source} gave {other:?}"),
    }
}

proptest! {
    /// Single-line input never panics; it either runs or reports an error.
    #[test]
    fn arbitrary_lines_do_not_panic(s in "\\PC*") {
        let _ = evaluate(&s);
    }

    /// `a == b * (a // b) + a % b`, and the remainder takes the divisor's sign.
    #[test]
    fn floored_division_identity(a in -1_000_000_i64..1_000_000, b in -1000_i64..1000) {
        prop_assume!(b != 0);
        let source = format!("a = {a}\nb = {b}\nb * (a // b) + a % b == a");
        prop_assert_eq!(value_of(&source), "1");

        let rem = a.rem_euclid(b.abs());
        let expected = if b < 0 && rem != 0 { rem + b } else { rem };
        prop_assert_eq!(value_of(&format!("{a} % {b}")), expected.to_string());
    }

    /// Shifting matches two's-complement `i64` shifts.
    #[test]
    fn shifts_match_native_integers(x in any::<i64>(), n in 0_u32..64) {
        prop_assert_eq!(value_of(&format!("{x} << {n}")), (x << n).to_string());
        prop_assert_eq!(value_of(&format!("{x} >> {n}")), (x >> n).to_string());
    }

    /// Repetition multiplies the length.
    #[test]
    fn repetition_length(s in "[a-z]{1,5}", n in 0_usize..200) {
        let source = format!("len('{s}' * {n})");
        prop_assert_eq!(value_of(&source), (s.len() * n).to_string());
    }

    /// Loops sum the same way every time, and across resets.
    #[test]
    fn loops_are_deterministic(from in -20_i64..20, to in -20_i64..20) {
        let source = format!("s = 0\nfor i = {from} to {to}\n  s = s + i\nend");
        let mut interpreter = Interpreter::with_default_modules();
        interpreter.set_source(source);
        prop_assert!(interpreter.run());
        let first = interpreter.vars["s"].clone();
        interpreter.reset();
        prop_assert!(interpreter.run());
        prop_assert_eq!(&interpreter.vars["s"], &first);

        let expected: i64 = (from..=to).sum();
        prop_assert_eq!(first, Value::from(expected));
    }
}
