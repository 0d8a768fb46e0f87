use tracing::trace;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::{
        evaluator::core::Interpreter,
        event::Event,
        lexer::{SourceLocation, TokenKind},
        module::NativeFunction,
        operator::LOWEST_LEVEL,
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates the identifier at the current token.
    ///
    /// Names resolve to a variable first, then to a constant of any imported
    /// module, then to a module function, which must be followed by an
    /// argument list in parentheses.
    ///
    /// # Errors
    /// - `UndeclaredIdentifier` if nothing matches.
    /// - `MissingToken` if a function name is not followed by `(`.
    /// - Any error raised by the called function.
    pub(crate) fn eval_identifier(&mut self) -> EvalResult<Value> {
        let token = self.lexer.token().clone();
        let name = token.text.as_str();

        if let Some(value) = self.vars.get(name).or_else(|| self.find_constant(name)).cloned() {
            self.advance()?;
            return Ok(value);
        }
        if let Some(function) = self.find_function(name) {
            self.advance()?;
            return self.call_function(name, &function, token.location);
        }
        Err(ScriptError::undeclared(name).at(token.location))
    }

    /// The first constant named `name` in module order.
    #[must_use]
    pub fn find_constant(&self, name: &str) -> Option<&Value> {
        self.modules.iter().find_map(|module| module.constant(name))
    }

    /// The first function named `name` in module order.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<NativeFunction> {
        self.modules.iter().find_map(|module| module.function(name)).cloned()
    }

    /// Fails if `name` is reserved by an imported module.
    ///
    /// # Errors
    /// - `CannotAssignToFunction` for module function names.
    /// - `CannotAssignToConstant` for module constant names.
    pub(crate) fn ensure_assignable(&self, name: &str) -> EvalResult<()> {
        if self.find_function(name).is_some() {
            return Err(ScriptError::new(ErrorKind::CannotAssignToFunction,
                                        format!("'{name}' is a function")));
        }
        if self.find_constant(name).is_some() {
            return Err(ScriptError::new(ErrorKind::CannotAssignToConstant,
                                        format!("'{name}' is a constant")));
        }
        Ok(())
    }

    fn call_function(&mut self,
                     name: &str,
                     function: &NativeFunction,
                     location: SourceLocation)
                     -> EvalResult<Value> {
        self.expect(TokenKind::LParen, "(")?;
        let args = self.eval_arguments()?;

        trace!(function = name, arguments = args.len(), "calling module function");
        self.stats.count_function(name);
        self.emit(&Event::FunctionInvoking(name));
        function(&args).map_err(|e| e.or_at(location))
    }

    /// Evaluates a comma-separated argument list up to and including the
    /// closing parenthesis. Line breaks inside the list are ignored.
    fn eval_arguments(&mut self) -> EvalResult<Vec<Value>> {
        let mut args = Vec::new();
        self.skip_line_breaks()?;
        if self.lexer.token().kind == TokenKind::RParen {
            self.advance()?;
            return Ok(args);
        }

        loop {
            args.push(self.eval_level(LOWEST_LEVEL)?);
            self.skip_line_breaks()?;
            match self.lexer.token().kind {
                TokenKind::Comma => {
                    self.advance()?;
                    self.skip_line_breaks()?;
                },
                TokenKind::RParen => {
                    self.advance()?;
                    return Ok(args);
                },
                TokenKind::Unknown => return Err(ScriptError::unknown_token(self.lexer.token())),
                _ => {
                    return Err(ScriptError::missing_token(")").at(self.lexer.token().location));
                },
            }
        }
    }

    fn skip_line_breaks(&mut self) -> EvalResult<()> {
        while self.lexer.token().kind == TokenKind::NewLine {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        Interpreter,
        error::ErrorKind,
        interpreter::{module::Module, value::Value},
    };

    fn failure(source: &str) -> ErrorKind {
        let mut interpreter = Interpreter::with_default_modules();
        interpreter.set_source(source);
        assert!(!interpreter.run(), "{source} should fail");
        interpreter.last_error().map_or(ErrorKind::UnknownError, |e| e.kind)
    }

    #[test]
    fn reserved_names() {
        assert_eq!(failure("pi = 3"), ErrorKind::CannotAssignToConstant);
        assert_eq!(failure("sqrt = 3"), ErrorKind::CannotAssignToFunction);
        assert_eq!(failure("for sin = 1 to 2\nend"), ErrorKind::CannotAssignToFunction);
    }

    #[test]
    fn calls() {
        assert_eq!(failure("sqrt 4"), ErrorKind::MissingToken);
        assert_eq!(failure("max(1, 2"), ErrorKind::MissingToken);
        assert_eq!(failure("max(1 $ 2)"), ErrorKind::UnknownToken);
        assert_eq!(failure("nothing(1)"), ErrorKind::UndeclaredIdentifier);
        assert_eq!(failure("max()"), ErrorKind::InvalidArgument);
    }

    #[test]
    fn arguments_may_span_lines() {
        let mut interpreter = Interpreter::with_default_modules();
        interpreter.set_source("m = max(1,\n  7,\n  3\n)");
        assert!(interpreter.run());
        assert_eq!(interpreter.vars["m"], Value::from(7));
    }

    #[test]
    fn variables_shadow_constants_and_first_module_wins() {
        let first = Module::new("first").with_constant("k", Value::from(1));
        let second = Module::new("second").with_constant("k", Value::from(2));
        let mut interpreter = Interpreter::new();
        interpreter.import([first, second]);
        interpreter.set_source("a = k");
        assert!(interpreter.run());
        assert_eq!(interpreter.vars["a"], Value::from(1));

        interpreter.vars.insert("k".to_owned(), Value::from(9));
        assert_eq!(interpreter.find_constant("k"), Some(&Value::from(1)));
    }

    #[test]
    fn invocations_are_announced_and_counted() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut interpreter = Interpreter::with_default_modules();
        interpreter.subscribe(move |event| {
                       if let crate::interpreter::event::Event::FunctionInvoking(name) = event {
                           sink.borrow_mut().push((*name).to_owned());
                       }
                   });
        interpreter.set_source("x = abs(-1) + abs(sqrt(4))");
        assert!(interpreter.run());
        assert_eq!(*calls.borrow(), vec!["abs", "sqrt", "abs"]);
        assert_eq!(interpreter.stats().functions["abs"], 2);
    }
}
