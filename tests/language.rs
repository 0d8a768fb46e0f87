use std::{cell::RefCell, fs, rc::Rc};

use bigdecimal::BigDecimal;
use calcscript::{
    Interpreter, evaluate,
    error::ErrorKind,
    interpreter::{
        event::Event,
        hook::OperatorHook,
        module::Module,
        operator::{BinaryOperator, UnaryOperator},
        value::Value,
    },
};
use walkdir::WalkDir;

/// Runs `source` and returns every output value as text.
fn outputs_of(interpreter: &mut Interpreter, source: &str) -> Result<Vec<String>, ErrorKind> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    interpreter.subscribe(move |event| {
                   if let Some(value) = event.output() {
                       sink.borrow_mut().push(value.to_string());
                   }
               });
    interpreter.set_source(source);
    if interpreter.run() {
        Ok(seen.take())
    } else {
        Err(interpreter.last_error().map_or(ErrorKind::UnknownError, |e| e.kind))
    }
}

fn outputs(source: &str) -> Result<Vec<String>, ErrorKind> {
    outputs_of(&mut Interpreter::with_default_modules(), source)
}

fn assert_success(src: &str) {
    if let Err(e) = evaluate(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match evaluate(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail with {kind}"),
        Err(e) => assert_eq!(e.kind, kind, "{src}: {e}"),
    }
}

fn result_of(src: &str) -> String {
    match evaluate(src) {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => panic!("Script produced no output: {src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

#[test]
fn script_files_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let expected: Vec<String> = content.lines()
                                           .filter_map(|line| line.strip_prefix("# expect: "))
                                           .map(str::to_owned)
                                           .collect();
        let error = content.lines()
                           .find_map(|line| line.strip_prefix("# error: "))
                           .map(str::trim);

        count += 1;
        match (outputs(&content), error) {
            (Ok(actual), None) => assert_eq!(actual, expected, "{path:?}"),
            (Err(kind), Some(name)) => assert_eq!(kind.to_string(), name, "{path:?}"),
            (result, _) => panic!("{path:?} ended with {result:?}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2");
    assert_eq!(result_of("x = 7 * 9\nx"), "63");
    assert_eq!(result_of("10 / 4"), "2.5");
    assert_eq!(result_of("1 / 3"), "0.3333333333333333333333333333");
    assert_eq!(result_of("0.1 + 0.2 == 0.3"), "1");
}

#[test]
fn precedence() {
    assert_eq!(result_of("1+2*2"), "5");
    assert_eq!(result_of("(1+2)*2"), "6");
    assert_eq!(result_of("-2**2"), "-4");
    assert_eq!(result_of("(-2)**2"), "4");
}

#[test]
fn floored_modulo() {
    assert_eq!(result_of("10 % 3"), "1");
    assert_eq!(result_of("10 % -3"), "-2");
    assert_eq!(result_of("-10 % 3"), "2");
    assert_eq!(result_of("-10 % -3"), "-1");
    assert_eq!(result_of("-7 // 2"), "-4");
    assert_failure("1 % 0", ErrorKind::DivisionByZero);
}

#[test]
fn logic_needs_numbers() {
    assert_eq!(result_of("2 and -1"), "1");
    assert_eq!(result_of("0 or 0"), "0");
    assert_eq!(result_of("not ''"), "1");
    assert_failure("'x' and 2", ErrorKind::NotSupportedOperation);
    assert_failure("'a' or 'b'", ErrorKind::NotSupportedOperation);
}

#[test]
fn shift_saturation() {
    assert_eq!(result_of("1 << 63"), "-9223372036854775808");
    assert_eq!(result_of("1 << 64"), "0");
    assert_eq!(result_of("-4294967296 >> 33"), "-1");
    assert_failure("1 << -1", ErrorKind::NotSupportedOperation);
    assert_failure("1.5 & 1", ErrorKind::NotSupportedOperation);
}

#[test]
fn string_repetition_cap() {
    assert_eq!(result_of("len('x' * 10000)"), "10000");
    assert_failure("'x' * 10001", ErrorKind::StringOverflow);
    assert_failure("s = 'x' * 6000\ns + s", ErrorKind::StringOverflow);
}

#[test]
fn overflow() {
    assert_failure("9223372036854775807 + 1", ErrorKind::NumberOverflow);
    assert_failure("-9223372036854775808 - 1", ErrorKind::NumberOverflow);
    assert_eq!(result_of("0x8000000000000000"), "-9223372036854775808");
    assert_eq!(result_of("-9223372036854775808"), "-9223372036854775808");
}

#[test]
fn skipped_branches_are_silent() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut interpreter = Interpreter::with_default_modules();
    interpreter.subscribe(move |event| match event {
                   Event::Output(value) => sink.borrow_mut().push(format!("out {value}")),
                   Event::Assigning { name, .. } => sink.borrow_mut().push(format!("set {name}")),
                   _ => {},
               });
    interpreter.set_source("if 1 > 2\n  a = 1\n  'no'\nelse\n  b = 2\n  'yes'\nend");
    assert!(interpreter.run());
    assert_eq!(*events.borrow(), vec!["set b", "out yes"]);
}

#[test]
fn for_loop_visits_each_value() {
    assert_eq!(outputs("for i=1 to 3\n  i\nend").unwrap(), vec!["1", "2", "3"]);
}

#[test]
fn break_exits_only_the_inner_loop() {
    let source = "for i = 1 to 3
  for j = 1 to 3
    if j == 2
      break
    end
    j
  end
  i
end";
    assert_eq!(outputs(source).unwrap(), vec!["1", "1", "1", "2", "1", "3"]);
}

#[test]
fn control_flow_errors() {
    assert_failure("end", ErrorKind::UnexpectedToken);
    assert_failure("else", ErrorKind::UnexpectedToken);
    assert_failure("break", ErrorKind::UnexpectedToken);
    assert_failure("continue", ErrorKind::UnexpectedToken);
    assert_failure("for i = 1 to 3\n  i", ErrorKind::MissingToken);
    assert_failure("for i = 1 to 3\n  i = 'a'\nend", ErrorKind::InvalidDataType);
}

#[test]
fn determinism_after_reset() {
    let source = "acc = 1\nrepeat 5\n  acc = acc * 3 - 1\n  acc\nend";
    let mut interpreter = Interpreter::with_default_modules();
    let first = outputs_of(&mut interpreter, source).unwrap();
    interpreter.reset();
    assert_eq!(outputs_of(&mut interpreter, source).unwrap(), first);
    assert_eq!(first, vec!["2", "5", "14", "41", "122"]);
}

#[test]
fn reset_forgets_variables() {
    let mut interpreter = Interpreter::with_default_modules();
    interpreter.set_source("x = 5");
    assert!(interpreter.run());
    interpreter.set_source("y = x + 1");
    assert!(interpreter.run());
    assert_eq!(interpreter.vars["y"], Value::from(6));

    interpreter.reset();
    assert!(!interpreter.run());
    let error = interpreter.last_error().unwrap();
    assert_eq!(error.kind, ErrorKind::UndeclaredIdentifier);
    assert_eq!(error.location.to_string(), "1:5");
}

#[test]
fn hosts_can_seed_variables() {
    let mut interpreter = Interpreter::with_default_modules();
    interpreter.vars.insert("rate".to_owned(), Value::from(3));
    assert_eq!(outputs_of(&mut interpreter, "rate * 2").unwrap(), vec!["6"]);
}

#[test]
fn modules_and_functions() {
    assert_eq!(result_of("max(3, 9, 4) - min(3, 9, 4)"), "6");
    assert_eq!(result_of("sqrt(16) + abs(-2)"), "6");
    assert_eq!(result_of("upper('ab') + str(12)"), "AB12");
    assert_eq!(result_of("num('0x10') + 1"), "17");
    assert_failure("num('ten')", ErrorKind::InvalidArgument);
    assert_failure("abs('x')", ErrorKind::InvalidArgument);
    assert_failure("pi = 3", ErrorKind::CannotAssignToConstant);
    assert_failure("len = 3", ErrorKind::CannotAssignToFunction);

    let double = Module::new("host").with_function("double", |args: &[Value]| {
                                        Ok(Value::number(args[0].as_number()? * BigDecimal::from(2)))
                                    });
    let mut interpreter = Interpreter::new();
    interpreter.import([double]);
    assert_eq!(outputs_of(&mut interpreter, "double(21)").unwrap(), vec!["42"]);
}

struct Units;

impl OperatorHook for Units {
    fn unary(&self, op: UnaryOperator, operand: &Value) -> calcscript::error::EvalResult<Option<Value>> {
        if op == UnaryOperator::Minus && operand.tag.as_deref() == Some("locked") {
            return Ok(Some(operand.clone()));
        }
        Ok(None)
    }

    fn binary(&self,
              op: BinaryOperator,
              left: &Value,
              right: &Value)
              -> calcscript::error::EvalResult<Option<Value>> {
        if op == BinaryOperator::Add && left.tag != right.tag {
            return Err(ErrorKind::NotSupportedOperation.into());
        }
        Ok(None)
    }
}

#[test]
fn hooks_override_and_tags_survive() {
    let mut interpreter = Interpreter::with_default_modules();
    interpreter.set_hook(Box::new(Units));
    interpreter.vars.insert("a".to_owned(), Value::from(2).with_tag(Some("m".into())));
    interpreter.vars.insert("b".to_owned(), Value::from(3).with_tag(Some("m".into())));
    interpreter.vars.insert("k".to_owned(), Value::from(5).with_tag(Some("locked".into())));

    interpreter.set_source("c = a + b\nd = -k\ne = c * 2");
    assert!(interpreter.run());
    assert_eq!(interpreter.vars["c"], Value::from(5).with_tag(Some("m".into())));
    assert_eq!(interpreter.vars["d"], Value::from(5).with_tag(Some("locked".into())));
    assert_eq!(interpreter.vars["e"].tag.as_deref(), Some("m"));

    interpreter.set_source("a + 1");
    assert!(!interpreter.run());
    assert_eq!(interpreter.last_error().map(|e| e.kind), Some(ErrorKind::NotSupportedOperation));

    interpreter.clear_hook();
    interpreter.set_source("a + 1");
    assert!(interpreter.run());
}

#[test]
fn lexical_errors_are_located() {
    let error = evaluate("x = 1\ny = 12ab").unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidNumberFormat);
    assert_eq!(error.location.to_string(), "2:5");

    let error = evaluate("s = 'open").unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidStringLiteral);
}

#[test]
fn stepping_reports_progress() {
    let mut interpreter = Interpreter::new();
    interpreter.set_source("a = 1\nrepeat 2\n  a = a * 2\nend");
    let mut steps = 0;
    while interpreter.step().is_some() {
        steps += 1;
    }
    assert!(interpreter.last_error().is_none());
    assert_eq!(interpreter.vars["a"], Value::from(4));
    assert_eq!(steps, 8);
}
