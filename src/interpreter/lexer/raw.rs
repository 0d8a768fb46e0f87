use std::str::FromStr;

use bigdecimal::BigDecimal;
use logos::Logos;

use crate::interpreter::lexer::TokenKind;

/// Errors the raw scanner can report for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// No token starts with this character.
    #[default]
    UnknownCharacter,
    /// A numeric literal that does not parse.
    InvalidNumberFormat,
    /// A string literal without its closing quote.
    InvalidStringLiteral,
}

/// Tokens as produced by logos, before locations and keywords are attached.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
pub enum RawToken {
    /// Numeric literals such as `42`, `3.25`, `0xff`, `0o17` or `0b101`.
    ///
    /// Validation happens in the callback, so `1.2.3` is one malformed
    /// number rather than two tokens.
    #[regex(r"[0-9][0-9A-Za-z.]*", number_literal)]
    Number(BigDecimal),
    /// String literals in double or single quotes.
    #[token("\"", |lex| string_literal(lex, '"'))]
    #[token("'", |lex| string_literal(lex, '\''))]
    Str(String),
    /// Identifiers and keywords.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// `# comments` run to the end of the line.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `**`
    #[token("**")]
    StarStar,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `%`
    #[token("%")]
    Percent,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Assign,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Line breaks.
    #[token("\n")]
    NewLine,
    /// Blanks, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl RawToken {
    /// The token kind for payload-free raw tokens.
    ///
    /// Identifiers, numbers and strings are resolved by the caller; they map
    /// to their plain kinds here.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Number(_) => TokenKind::Number,
            Self::Str(_) => TokenKind::String,
            Self::Identifier => TokenKind::Identifier,
            Self::StarStar => TokenKind::StarStar,
            Self::Star => TokenKind::Star,
            Self::SlashSlash => TokenKind::SlashSlash,
            Self::Slash => TokenKind::Slash,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Percent => TokenKind::Percent,
            Self::Ampersand => TokenKind::Ampersand,
            Self::Pipe => TokenKind::Pipe,
            Self::Caret => TokenKind::Caret,
            Self::Tilde => TokenKind::Tilde,
            Self::ShiftLeft => TokenKind::ShiftLeft,
            Self::ShiftRight => TokenKind::ShiftRight,
            Self::EqualEqual => TokenKind::EqualEqual,
            Self::BangEqual => TokenKind::BangEqual,
            Self::LessEqual => TokenKind::LessEqual,
            Self::GreaterEqual => TokenKind::GreaterEqual,
            Self::Less => TokenKind::Less,
            Self::Greater => TokenKind::Greater,
            Self::Assign => TokenKind::Assign,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::Comma => TokenKind::Comma,
            Self::NewLine => TokenKind::NewLine,
            Self::Comment | Self::Ignored => TokenKind::Unknown,
        }
    }
}

fn number_literal(lex: &logos::Lexer<RawToken>) -> Result<BigDecimal, LexError> {
    parse_number(lex.slice()).ok_or(LexError::InvalidNumberFormat)
}

/// Parses a numeric literal.
///
/// `0x`, `0o` and `0b` prefixes select hexadecimal, octal and binary. Radix
/// literals accumulate in 64 bits with wraparound and are read as signed,
/// so `0xffffffffffffffff` is `-1`. Decimal literals are digits with at most
/// one `.`, and must start with a digit.
///
/// # Parameters
/// - `text`: The literal as written.
///
/// # Returns
/// - `Some(BigDecimal)`: The literal's value.
/// - `None`: If the literal is malformed.
///
/// # Example
/// ```
/// use calcscript::interpreter::lexer::parse_number;
/// use bigdecimal::BigDecimal;
///
/// assert_eq!(parse_number("0xff"), Some(BigDecimal::from(255)));
/// assert_eq!(parse_number("0b101"), Some(BigDecimal::from(5)));
/// assert_eq!(parse_number("0xffffffffffffffff"), Some(BigDecimal::from(-1)));
/// assert!(parse_number("1.2.3").is_none());
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<BigDecimal> {
    let radix = match text.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return parse_decimal(text),
    };
    parse_radix(&text[2..], radix).map(BigDecimal::from)
}

fn parse_radix(digits: &str, radix: u32) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }
    let mut accumulator: u64 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)?;
        accumulator = accumulator.wrapping_mul(u64::from(radix))
                                 .wrapping_add(u64::from(digit));
    }
    Some(i64::from_ne_bytes(accumulator.to_ne_bytes()))
}

fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    if fraction.is_empty() {
        BigDecimal::from_str(whole).ok()
    } else {
        BigDecimal::from_str(&format!("{whole}.{fraction}")).ok()
    }
}

/// Reads a quoted string starting just after the opening quote.
///
/// Supports `\n`, `\r`, `\t` and backslash-escaped quotes and backslashes.
/// Any other escaped character stands for itself. A line break or the end of
/// input before the closing quote is an error.
fn string_literal(lex: &mut logos::Lexer<RawToken>, quote: char) -> Result<String, LexError> {
    let mut text = String::new();
    let mut chars = lex.remainder().char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            c if c == quote => {
                lex.bump(offset + c.len_utf8());
                return Ok(text);
            },
            '\n' => break,
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 'r')) => text.push('\r'),
                Some((_, 't')) => text.push('\t'),
                Some((_, '\n')) | None => break,
                Some((_, other)) => text.push(other),
            },
            c => text.push(c),
        }
    }
    Err(LexError::InvalidStringLiteral)
}
