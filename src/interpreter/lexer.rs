//! The lexer turns source text into tokens on demand.
//!
//! Unlike a batch tokenizer it keeps a cursor into the source and exposes
//! the current token plus one token of lookahead. The statement engine
//! rewinds it with [`Lexer::move_to`] to re-run loop bodies, so every token
//! carries a [`SourceLocation`] that can later be jumped back to.

pub mod raw;
pub mod token;

use std::{cmp::Ordering, fmt, rc::Rc};

use logos::Logos;
pub use raw::{LexError, RawToken, parse_number};
pub use token::{Token, TokenKind};

use crate::error::{ErrorKind, EvalResult, ScriptError};

/// A position in the source.
///
/// `index` is a byte offset; `line` and `column` are zero-based, with the
/// column counted in characters. Displayed one-based as `line:column`.
/// Locations order by `index`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Byte offset into the source.
    pub index:  usize,
    /// Zero-based line number.
    pub line:   usize,
    /// Zero-based column, in characters.
    pub column: usize,
}

impl SourceLocation {
    /// The location reached after reading `text` from here.
    #[must_use]
    pub fn advanced_over(self, text: &str) -> Self {
        let mut location = self;
        for ch in text.chars() {
            if ch == '\n' {
                location.line += 1;
                location.column = 0;
            } else {
                location.column += 1;
            }
        }
        location.index += text.len();
        location
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A rewindable token stream over a shared source.
///
/// # Example
/// ```
/// use calcscript::interpreter::lexer::{Lexer, SourceLocation, TokenKind};
///
/// let mut lexer = Lexer::new("x = 1\n".into());
/// lexer.move_to(SourceLocation::default()).unwrap();
/// assert_eq!(lexer.token().kind, TokenKind::Identifier);
/// assert_eq!(lexer.next_token().kind, TokenKind::Assign);
/// lexer.advance().unwrap();
/// lexer.advance().unwrap();
/// assert_eq!(lexer.token().text, "1");
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    source:  Rc<str>,
    cursor:  SourceLocation,
    current: Token,
    next:    Token,
}

impl Lexer {
    /// Creates a lexer. No token is read until [`Lexer::move_to`] is called.
    #[must_use]
    pub fn new(source: Rc<str>) -> Self {
        let start = SourceLocation::default();
        Self { source,
               cursor: start,
               current: Token::eof(start),
               next: Token::eof(start) }
    }

    /// The source being scanned.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The current token.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.current
    }

    /// The token after the current one.
    #[must_use]
    pub const fn next_token(&self) -> &Token {
        &self.next
    }

    /// Moves one token forward.
    ///
    /// # Errors
    /// Returns `InvalidNumberFormat` or `InvalidStringLiteral` if the newly
    /// scanned lookahead token is malformed.
    pub fn advance(&mut self) -> EvalResult<()> {
        let next = self.scan()?;
        self.current = std::mem::replace(&mut self.next, next);
        Ok(())
    }

    /// Repositions the lexer so that the token at `location` is current.
    ///
    /// `location` must be the start of a token previously produced by this
    /// lexer, or the start of the source.
    ///
    /// # Errors
    /// Returns a lexical error if either of the two tokens read is malformed.
    pub fn move_to(&mut self, location: SourceLocation) -> EvalResult<()> {
        self.cursor = location;
        self.current = self.scan()?;
        self.next = self.scan()?;
        Ok(())
    }

    fn scan(&mut self) -> EvalResult<Token> {
        let source = Rc::clone(&self.source);
        let start = self.cursor.index;
        if start >= source.len() {
            return Ok(Token::eof(self.cursor));
        }

        let mut raw = RawToken::lexer(&source);
        raw.bump(start);
        let Some(result) = raw.next() else {
            self.cursor = self.cursor.advanced_over(&source[start..]);
            return Ok(Token::eof(self.cursor));
        };

        let span = raw.span();
        let location = self.cursor.advanced_over(&source[start..span.start]);
        self.cursor = location.advanced_over(&source[span.clone()]);
        let text = &source[span];

        match result {
            Ok(RawToken::Identifier) => {
                let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
                Ok(Token::new(kind, text, location))
            },
            Ok(RawToken::Number(value)) => Ok(Token::number(value, text, location)),
            Ok(RawToken::Str(contents)) => Ok(Token::new(TokenKind::String, contents, location)),
            Ok(other) => Ok(Token::new(other.kind(), text, location)),
            Err(LexError::UnknownCharacter) => Ok(Token::new(TokenKind::Unknown, text, location)),
            Err(LexError::InvalidNumberFormat) => {
                Err(ScriptError::new(ErrorKind::InvalidNumberFormat,
                                     format!("'{text}' is not a valid number")).at(location))
            },
            Err(LexError::InvalidStringLiteral) => {
                Err(ScriptError::new(ErrorKind::InvalidStringLiteral,
                                     "String literal is not terminated").at(location))
            },
        }
    }
}
