use std::rc::Rc;

use crate::interpreter::lexer::{Lexer, SourceLocation, TokenKind};

/// Collects REPL input until it forms complete statements.
///
/// Every line that opens an `if`, `for` or `repeat` block raises the
/// balance and every `end` lowers it. While the balance is positive lines
/// are held back; once it drops to zero or below the whole buffer is
/// released for execution.
///
/// # Example
/// ```
/// use calcscript::interactive::Interactive;
///
/// let mut input = Interactive::new();
/// assert_eq!(input.push_line("x = 1"), Some("x = 1\n".to_owned()));
/// assert_eq!(input.push_line("for i = 1 to 3"), None);
/// assert!(input.is_pending());
/// assert_eq!(input.push_line("end"), Some("for i = 1 to 3\nend\n".to_owned()));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Interactive {
    buffer:  String,
    balance: i64,
}

impl Interactive {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one line of input.
    ///
    /// # Returns
    /// The buffered text, including this line, once every block opened in
    /// it has been closed; `None` while blocks remain open.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self.balance += block_balance(line);

        if self.balance > 0 {
            return None;
        }
        self.balance = 0;
        Some(std::mem::take(&mut self.buffer))
    }

    /// Whether lines are being held back.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.balance > 0
    }

    /// Discards held-back lines.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.balance = 0;
    }
}

/// Block openers minus `end` keywords in `line`.
///
/// Scanning stops at the first malformed token; the interpreter reports it
/// once the buffer runs.
fn block_balance(line: &str) -> i64 {
    let mut lexer = Lexer::new(Rc::from(line));
    let mut balance = 0;
    if lexer.move_to(SourceLocation::default()).is_err() {
        return balance;
    }
    loop {
        match lexer.token().kind {
            TokenKind::If | TokenKind::For | TokenKind::Repeat => balance += 1,
            TokenKind::End => balance -= 1,
            TokenKind::Eof => return balance,
            _ => {},
        }
        if lexer.advance().is_err() {
            return balance;
        }
    }
}
