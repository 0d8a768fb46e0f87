use std::fmt;

use crate::{
    error::{ErrorKind, ScriptError},
    interpreter::lexer::TokenKind,
};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `and`
    And,
    /// `or`
    Or,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `~x`
    BitNot,
    /// `not x`
    Not,
}

/// Binding strength of `or`, the loosest binary operator.
pub const LOWEST_LEVEL: u8 = 1;
/// Binding strength of the prefix `not`.
pub const NOT_LEVEL: u8 = 3;
/// Binding strength of `* / // %`, the tightest left-associative level.
pub const HIGHEST_LEVEL: u8 = 10;

/// The precedence level of a binary operator token, lowest first.
///
/// `**` and the unary operators bind tighter than every level listed here
/// and are handled separately by the evaluator.
#[must_use]
pub const fn binary_level(kind: TokenKind) -> Option<u8> {
    use TokenKind::{
        Ampersand, And, BangEqual, Caret, EqualEqual, Greater, GreaterEqual, Less, LessEqual,
        Minus, Or, Percent, Pipe, Plus, ShiftLeft, ShiftRight, Slash, SlashSlash, Star,
    };

    match kind {
        Or => Some(1),
        And => Some(2),
        EqualEqual | BangEqual | Less | Greater | LessEqual | GreaterEqual => Some(4),
        Pipe => Some(5),
        Caret => Some(6),
        Ampersand => Some(7),
        ShiftLeft | ShiftRight => Some(8),
        Plus | Minus => Some(9),
        Star | Slash | SlashSlash | Percent => Some(10),
        _ => None,
    }
}

impl TryFrom<TokenKind> for BinaryOperator {
    type Error = ScriptError;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        Ok(match kind {
               TokenKind::Plus => Self::Add,
               TokenKind::Minus => Self::Sub,
               TokenKind::Star => Self::Mul,
               TokenKind::Slash => Self::Div,
               TokenKind::SlashSlash => Self::FloorDiv,
               TokenKind::Percent => Self::Mod,
               TokenKind::StarStar => Self::Pow,
               TokenKind::Ampersand => Self::BitAnd,
               TokenKind::Pipe => Self::BitOr,
               TokenKind::Caret => Self::BitXor,
               TokenKind::ShiftLeft => Self::Shl,
               TokenKind::ShiftRight => Self::Shr,
               TokenKind::EqualEqual => Self::Equal,
               TokenKind::BangEqual => Self::NotEqual,
               TokenKind::Less => Self::Less,
               TokenKind::Greater => Self::Greater,
               TokenKind::LessEqual => Self::LessEqual,
               TokenKind::GreaterEqual => Self::GreaterEqual,
               TokenKind::And => Self::And,
               TokenKind::Or => Self::Or,
               other => {
                   return Err(ScriptError::new(ErrorKind::UnknownOperator,
                                               format!("{other} is not a binary operator")));
               },
           })
    }
}

impl TryFrom<TokenKind> for UnaryOperator {
    type Error = ScriptError;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Plus => Ok(Self::Plus),
            TokenKind::Minus => Ok(Self::Minus),
            TokenKind::Tilde => Ok(Self::BitNot),
            TokenKind::Not => Ok(Self::Not),
            other => Err(ScriptError::new(ErrorKind::UnknownOperator,
                                          format!("{other} is not a unary operator"))),
        }
    }
}

impl BinaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl UnaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitNot => "~",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
