use std::fmt;

/// Classification of every error the interpreter can raise.
///
/// The set is closed. It holds the classic calculator kinds plus one
/// addition, [`ErrorKind::DivisionByZero`]. Hosts that only know the classic
/// kinds can treat it like [`ErrorKind::NotSupportedOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A run was attempted before any source text was set.
    NothingSource,
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken,
    /// The lexer met a character that starts no token.
    UnknownToken,
    /// A required token (such as `end` or `)`) is absent.
    MissingToken,
    /// A name is neither a variable, a constant nor a function.
    UndeclaredIdentifier,
    /// Assignment to a name owned by a module constant.
    CannotAssignToConstant,
    /// Assignment to a name owned by a module function.
    CannotAssignToFunction,
    /// An operator token has no operator mapping.
    UnknownOperator,
    /// Operand types do not fit the operation and cannot be coerced.
    InvalidDataType,
    /// A module function rejected its arguments.
    InvalidArgument,
    /// A numeric literal is malformed.
    InvalidNumberFormat,
    /// A string literal is not terminated on its line.
    InvalidStringLiteral,
    /// A number left the signed 64-bit range.
    NumberOverflow,
    /// A string grew beyond the length cap.
    StringOverflow,
    /// The operator is not defined for the operand values.
    NotSupportedOperation,
    /// Division, floor-division or remainder by zero. Not one of the classic
    /// kinds; see the type docs.
    DivisionByZero,
    /// Anything else, typically a failure reported by host code.
    UnknownError,
}

impl ErrorKind {
    /// Returns a short, human-readable description of the kind.
    ///
    /// Used as the message when an error is raised without a more specific
    /// explanation.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NothingSource => "there is no source to run",
            Self::UnexpectedToken => "unexpected token",
            Self::UnknownToken => "unknown token",
            Self::MissingToken => "missing token",
            Self::UndeclaredIdentifier => "undeclared identifier",
            Self::CannotAssignToConstant => "cannot assign to a constant",
            Self::CannotAssignToFunction => "cannot assign to a function",
            Self::UnknownOperator => "unknown operator",
            Self::InvalidDataType => "invalid data type",
            Self::InvalidArgument => "invalid argument",
            Self::InvalidNumberFormat => "invalid number format",
            Self::InvalidStringLiteral => "invalid string literal",
            Self::NumberOverflow => "number overflow",
            Self::StringOverflow => "string overflow",
            Self::NotSupportedOperation => "operation not supported",
            Self::DivisionByZero => "division by zero",
            Self::UnknownError => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_divisor_has_its_own_kind() {
        assert_ne!(ErrorKind::DivisionByZero, ErrorKind::NotSupportedOperation);
        assert_eq!(ErrorKind::DivisionByZero.description(), "division by zero");
        assert_eq!(ErrorKind::DivisionByZero.to_string(), "DivisionByZero");
    }
}
