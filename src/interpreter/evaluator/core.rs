use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    error::{ErrorInfo, ErrorKind, EvalResult, ScriptError},
    interpreter::{
        event::{Event, Listener},
        hook::OperatorHook,
        lexer::{Lexer, SourceLocation, Token, TokenKind},
        module::{Module, default_modules},
        stats::RunStats,
        statement::Flow,
        value::Value,
    },
};

/// One open compound statement.
///
/// `token` is the `if`, `for` or `repeat` keyword that opened it. For loops
/// its location is the address the lexer rewinds to, and `loop_variable`
/// names the variable stepped at each `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The opening keyword.
    pub token:         Token,
    /// The loop variable, or the hidden counter of a `repeat`.
    pub loop_variable: Option<String>,
}

impl Clause {
    /// Whether this clause is a `for` or `repeat` loop.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        matches!(self.token.kind, TokenKind::For | TokenKind::Repeat)
    }
}

/// The script interpreter.
///
/// Holds the variables, imported modules, listeners and the state of the
/// current run. Source text is re-scanned on every run; there is no parse
/// tree. Statements are executed straight from the token stream, compound
/// statements are tracked on a clause stack, and loops rewind the lexer to
/// their header.
///
/// ## Usage
///
/// Create one interpreter, import modules, subscribe listeners, then call
/// [`Interpreter::set_source`] and [`Interpreter::run`] as often as needed.
/// Variables persist between runs until [`Interpreter::reset`].
///
/// # Example
/// ```
/// use calcscript::{Interpreter, interpreter::value::Value};
///
/// let mut interpreter = Interpreter::with_default_modules();
/// interpreter.set_source("total = 0\nfor i = 1 to 4\n  total = total + i\nend");
/// assert!(interpreter.run());
/// assert_eq!(interpreter.vars["total"], Value::from(10));
/// ```
pub struct Interpreter {
    /// Script variables. Hosts may read and modify them between runs.
    pub vars:                  HashMap<String, Value>,
    source:                    Option<Rc<str>>,
    pub(crate) lexer:          Lexer,
    running:                   bool,
    pub(crate) clauses:        Vec<Clause>,
    pub(crate) modules:        Vec<Module>,
    pub(crate) hook:           Option<Box<dyn OperatorHook>>,
    listeners:                 Vec<Listener>,
    pub(crate) stats:          RunStats,
    last_error:                Option<ErrorInfo>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with no modules, variables or source.
    #[must_use]
    pub fn new() -> Self {
        Self { vars:       HashMap::new(),
               source:     None,
               lexer:      Lexer::new(Rc::from("")),
               running:    false,
               clauses:    Vec::new(),
               modules:    Vec::new(),
               hook:       None,
               listeners:  Vec::new(),
               stats:      RunStats::default(),
               last_error: None, }
    }

    /// Creates an interpreter with the bundled `math` and `text` modules.
    #[must_use]
    pub fn with_default_modules() -> Self {
        let mut interpreter = Self::new();
        interpreter.import(default_modules());
        interpreter
    }

    /// Sets the script to run.
    ///
    /// The lexer and clause stack start over; variables and modules are
    /// kept.
    pub fn set_source(&mut self, source: impl Into<Rc<str>>) {
        let source = source.into();
        self.lexer = Lexer::new(Rc::clone(&source));
        self.source = Some(source);
        self.running = false;
        self.close_clauses();
    }

    /// The current script, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Appends modules to the lookup order.
    pub fn import(&mut self, modules: impl IntoIterator<Item = Module>) {
        self.modules.extend(modules);
    }

    /// The imported modules in lookup order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Installs an operator hook, replacing any previous one.
    pub fn set_hook(&mut self, hook: Box<dyn OperatorHook>) {
        self.hook = Some(hook);
    }

    /// Removes the operator hook.
    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    /// Registers a listener for [`Event`]s.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Clears variables, statistics and the last error.
    pub fn reset(&mut self) {
        self.vars.clear();
        self.stats = RunStats::default();
        self.last_error = None;
        self.clauses.clear();
        self.running = false;
    }

    /// The error that ended the most recent run, if it failed.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }

    /// Counters accumulated since the last reset.
    #[must_use]
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Runs the script from the start.
    ///
    /// # Returns
    /// `true` if the script ran to the end or hit `exit`, `false` if it
    /// failed. The failure is available from [`Interpreter::last_error`] and
    /// was also sent as [`Event::ErrorOccurred`].
    pub fn run(&mut self) -> bool {
        self.running = false;
        debug!(source_len = self.source.as_ref().map_or(0, |s| s.len()), "run started");
        while self.step().is_some() {}
        let success = self.last_error.is_none();
        debug!(success, statements = self.stats.statements, "run finished");
        success
    }

    /// Executes a single statement.
    ///
    /// The first call, and the first call after a run ended, starts the
    /// script from the top.
    ///
    /// # Returns
    /// The byte offset where execution will resume, or `None` once the run
    /// has finished or failed.
    ///
    /// # Example
    /// ```
    /// use calcscript::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    /// interpreter.set_source("a = 1\nb = 2");
    /// assert_eq!(interpreter.step(), Some(6));
    /// assert_eq!(interpreter.step(), Some(11));
    /// assert_eq!(interpreter.step(), None);
    /// assert!(interpreter.last_error().is_none());
    /// ```
    pub fn step(&mut self) -> Option<usize> {
        if !self.running {
            if let Err(error) = self.start() {
                self.fail(error);
                return None;
            }
        }
        match self.execute_statement() {
            Ok(Flow::Next) => Some(self.lexer.token().location.index),
            Ok(Flow::Finished) => {
                self.running = false;
                self.close_clauses();
                None
            },
            Err(error) => {
                self.fail(error);
                None
            },
        }
    }

    fn start(&mut self) -> EvalResult<()> {
        self.last_error = None;
        self.close_clauses();
        if self.source.is_none() {
            return Err(ScriptError::new(ErrorKind::NothingSource, "There is no script to run"));
        }
        self.lexer.move_to(SourceLocation::default())?;
        self.running = true;
        Ok(())
    }

    fn fail(&mut self, error: ScriptError) {
        let info = ErrorInfo::from_error(error, self.lexer.token().location);
        debug!(kind = %info.kind, location = %info.location, message = %info.message, "run failed");
        self.running = false;
        self.close_clauses();
        self.emit(&Event::ErrorOccurred(&info));
        self.last_error = Some(info);
    }

    /// Empties the clause stack, removing hidden `repeat` counters.
    fn close_clauses(&mut self) {
        for clause in std::mem::take(&mut self.clauses) {
            self.forget_counter(&clause);
        }
    }

    /// Sends an event to every listener.
    pub(crate) fn emit(&mut self, event: &Event<'_>) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Consumes the current token.
    pub(crate) fn advance(&mut self) -> EvalResult<()> {
        self.stats.count_token(self.lexer.token().kind);
        self.lexer.advance()
    }

    /// Consumes a token of the given kind or fails with `MissingToken`, or
    /// `UnknownToken` if the current token is not part of the language.
    pub(crate) fn expect(&mut self, kind: TokenKind, text: &str) -> EvalResult<()> {
        let token = self.lexer.token();
        if token.kind == TokenKind::Unknown {
            return Err(ScriptError::unknown_token(token));
        }
        if token.kind != kind {
            return Err(ScriptError::missing_token(text).at(token.location));
        }
        self.advance()
    }

    /// Requires the statement to end here and moves past the line break.
    pub(crate) fn expect_end_of_statement(&mut self) -> EvalResult<()> {
        match self.lexer.token().kind {
            TokenKind::NewLine => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(ScriptError::unexpected_token(self.lexer.token())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn run_without_source() {
        let mut interpreter = Interpreter::new();
        assert!(!interpreter.run());
        assert_eq!(interpreter.last_error().map(|e| e.kind), Some(ErrorKind::NothingSource));
    }

    #[test]
    fn error_event_fires_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut interpreter = Interpreter::new();
        interpreter.subscribe(move |event| {
                       if let Some(info) = event.error() {
                           sink.borrow_mut().push(info.kind);
                       }
                   });
        interpreter.set_source("x = 1\ny = nope");
        assert!(!interpreter.run());
        assert_eq!(*seen.borrow(), vec![ErrorKind::UndeclaredIdentifier]);
        assert_eq!(interpreter.vars["x"], Value::from(1));
    }

    #[test]
    fn failure_location_is_reported() {
        let mut interpreter = Interpreter::new();
        interpreter.set_source("a = 1\nb = a +* 2");
        assert!(!interpreter.run());
        let error = interpreter.last_error().unwrap();
        assert_eq!(error.kind, ErrorKind::UnexpectedToken);
        assert_eq!(error.location.to_string(), "2:8");
    }

    #[test]
    fn a_successful_run_clears_the_last_error() {
        let mut interpreter = Interpreter::new();
        interpreter.set_source("1 / 0");
        assert!(!interpreter.run());
        interpreter.set_source("1 / 2");
        assert!(interpreter.run());
        assert!(interpreter.last_error().is_none());
    }

    #[test]
    fn failed_loops_leave_no_hidden_counters() {
        let mut interpreter = Interpreter::new();
        interpreter.set_source("repeat 3\n  x = nope\nend");
        assert!(!interpreter.run());
        assert!(interpreter.vars.is_empty());
    }

    #[test]
    fn reset_clears_state() {
        let mut interpreter = Interpreter::new();
        interpreter.set_source("x = 2");
        assert!(interpreter.run());
        interpreter.reset();
        assert!(interpreter.vars.is_empty());
        assert_eq!(interpreter.stats().statements, 0);
    }
}
