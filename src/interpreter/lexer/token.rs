use std::fmt;

use bigdecimal::BigDecimal;

use crate::interpreter::lexer::SourceLocation;

/// The type of a lexical token.
///
/// Keywords get their own kinds; the lexer only produces them for exact,
/// lower-case matches, so `If` or `END` stay plain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// A line break; statements end here.
    NewLine,
    /// A name such as `x` or `sqrt`.
    Identifier,
    /// A numeric literal.
    Number,
    /// A string literal.
    String,
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `end`
    End,
    /// `for`
    For,
    /// `to`
    To,
    /// `repeat`
    Repeat,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `exit`
    Exit,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `true`
    True,
    /// `false`
    False,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `//`
    SlashSlash,
    /// `%`
    Percent,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `=`
    Assign,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// A character that starts no token. Rejected when evaluated.
    Unknown,
}

impl TokenKind {
    /// Maps an identifier to its keyword kind, if it is a keyword.
    ///
    /// Only exact matches count.
    ///
    /// # Example
    /// ```
    /// use calcscript::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("repeat"), Some(TokenKind::Repeat));
    /// assert_eq!(TokenKind::keyword("Repeat"), None);
    /// ```
    #[must_use]
    pub fn keyword(identifier: &str) -> Option<Self> {
        Some(match identifier {
                 "if" => Self::If,
                 "elif" => Self::Elif,
                 "else" => Self::Else,
                 "end" => Self::End,
                 "for" => Self::For,
                 "to" => Self::To,
                 "repeat" => Self::Repeat,
                 "break" => Self::Break,
                 "continue" => Self::Continue,
                 "exit" => Self::Exit,
                 "and" => Self::And,
                 "or" => Self::Or,
                 "not" => Self::Not,
                 "true" => Self::True,
                 "false" => Self::False,
                 _ => return None,
             })
    }

    /// Whether this token opens a compound statement that needs an `end`.
    #[must_use]
    pub const fn opens_block(self) -> bool {
        matches!(self, Self::If | Self::For | Self::Repeat)
    }

    /// Whether this token terminates a statement.
    #[must_use]
    pub const fn ends_statement(self) -> bool {
        matches!(self, Self::NewLine | Self::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single token with its location.
///
/// For string literals `text` holds the unescaped contents; for every other
/// token it is the source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token type.
    pub kind:     TokenKind,
    /// Where the token starts.
    pub location: SourceLocation,
    /// The token text.
    pub text:     String,
    /// The value of a numeric literal.
    pub number:   Option<BigDecimal>,
}

impl Token {
    /// Creates a token without a numeric payload.
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self { kind,
               location,
               text: text.into(),
               number: None }
    }

    /// Creates the end-of-input token.
    #[must_use]
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }

    /// Creates a numeric literal token.
    #[must_use]
    pub fn number(value: BigDecimal, text: &str, location: SourceLocation) -> Self {
        Self { kind: TokenKind::Number,
               location,
               text: text.to_owned(),
               number: Some(value) }
    }
}
