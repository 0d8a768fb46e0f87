use std::collections::HashMap;

use crate::interpreter::lexer::TokenKind;

/// Counters collected while scripts run.
///
/// Purely diagnostic. Counts accumulate across runs until the interpreter
/// is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Statements executed, counting every pass through a loop body.
    pub statements: u64,
    /// Tokens consumed by the engine, by kind.
    pub tokens:     HashMap<TokenKind, u64>,
    /// Operators applied, keyed by their source symbol.
    pub operators:  HashMap<&'static str, u64>,
    /// Module function calls, by function name.
    pub functions:  HashMap<String, u64>,
}

impl RunStats {
    pub(crate) fn count_token(&mut self, kind: TokenKind) {
        *self.tokens.entry(kind).or_default() += 1;
    }

    pub(crate) fn count_operator(&mut self, symbol: &'static str) {
        *self.operators.entry(symbol).or_default() += 1;
    }

    pub(crate) fn count_function(&mut self, name: &str) {
        match self.functions.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.functions.insert(name.to_owned(), 1);
            },
        }
    }

    /// Total number of tokens consumed.
    #[must_use]
    pub fn token_total(&self) -> u64 {
        self.tokens.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut stats = RunStats::default();
        stats.count_token(TokenKind::Number);
        stats.count_token(TokenKind::Number);
        stats.count_token(TokenKind::Plus);
        stats.count_function("sqrt");
        stats.count_function("sqrt");
        stats.count_operator("+");

        assert_eq!(stats.tokens[&TokenKind::Number], 2);
        assert_eq!(stats.token_total(), 3);
        assert_eq!(stats.functions["sqrt"], 2);
        assert_eq!(stats.operators["+"], 1);
    }
}
