use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{
        evaluator::core::Interpreter,
        lexer::TokenKind,
        operator::{
            BinaryOperator, HIGHEST_LEVEL, LOWEST_LEVEL, NOT_LEVEL, UnaryOperator, binary_level,
        },
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a complete expression starting at the current token.
    ///
    /// This is the entry point used for statement values, assignments,
    /// conditions and loop bounds. The result must fit the signed 64-bit
    /// range if it is a number; intermediate results may exceed it.
    ///
    /// # Errors
    /// Any error raised while evaluating, or `NumberOverflow` for an
    /// out-of-range result.
    pub(crate) fn eval_expression(&mut self) -> EvalResult<Value> {
        let start = self.lexer.token().location;
        let value = self.eval_level(LOWEST_LEVEL)?;
        value.check_range().map_err(|e| e.or_at(start))?;
        Ok(value)
    }

    /// Evaluates left-associative binary operators of `level` and tighter.
    ///
    /// Levels run from `or` (loosest) to `* / // %`. The prefix `not` sits
    /// between `and` and the comparisons, so `not a == b` negates the
    /// comparison. Past the last level come the unary operators and `**`.
    pub(crate) fn eval_level(&mut self, level: u8) -> EvalResult<Value> {
        if level > HIGHEST_LEVEL {
            return self.eval_unary_expression();
        }
        if level == NOT_LEVEL {
            return self.eval_not();
        }

        let mut left = self.eval_level(level + 1)?;
        loop {
            let token = self.lexer.token();
            if binary_level(token.kind) != Some(level) {
                return Ok(left);
            }
            let location = token.location;
            let op = BinaryOperator::try_from(token.kind).map_err(|e| e.at(location))?;
            self.advance()?;
            let right = self.eval_level(level + 1)?;
            left = self.eval_binary(op, &left, &right).map_err(|e| e.or_at(location))?;
        }
    }

    fn eval_not(&mut self) -> EvalResult<Value> {
        if self.lexer.token().kind != TokenKind::Not {
            return self.eval_level(NOT_LEVEL + 1);
        }
        let location = self.lexer.token().location;
        self.advance()?;
        let operand = self.eval_not()?;
        self.eval_unary(UnaryOperator::Not, &operand).map_err(|e| e.or_at(location))
    }

    /// Prefix `+`, `-` and `~`. Their operand is a power expression, so
    /// `-2**2` is `-4`.
    fn eval_unary_expression(&mut self) -> EvalResult<Value> {
        let (kind, location) = (self.lexer.token().kind, self.lexer.token().location);
        let op = match kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Tilde => UnaryOperator::try_from(kind)?,
            _ => return self.eval_power(),
        };
        self.advance()?;
        let operand = self.eval_unary_expression()?;
        self.eval_unary(op, &operand).map_err(|e| e.or_at(location))
    }

    /// `**` binds tighter than the prefix operators on its left and is
    /// right-associative; its exponent may carry a sign, as in `2**-1`.
    fn eval_power(&mut self) -> EvalResult<Value> {
        let base = self.eval_primary()?;
        if self.lexer.token().kind != TokenKind::StarStar {
            return Ok(base);
        }
        let location = self.lexer.token().location;
        self.advance()?;
        let exponent = self.eval_unary_expression()?;
        self.eval_binary(BinaryOperator::Pow, &base, &exponent)
            .map_err(|e| e.or_at(location))
    }

    fn eval_primary(&mut self) -> EvalResult<Value> {
        let token = self.lexer.token().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance()?;
                Ok(Value::number(token.number.unwrap_or_default()))
            },
            TokenKind::String => {
                self.advance()?;
                Ok(Value::string(token.text))
            },
            TokenKind::True | TokenKind::False => {
                self.advance()?;
                Ok(Value::boolean(token.kind == TokenKind::True))
            },
            TokenKind::LParen => {
                self.advance()?;
                let value = self.eval_level(LOWEST_LEVEL)?;
                self.expect(TokenKind::RParen, ")")?;
                Ok(value)
            },
            TokenKind::Identifier => self.eval_identifier(),
            _ => Err(ScriptError::unexpected_token(&token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Interpreter, error::ErrorKind, interpreter::value::Value};

    fn eval(source: &str) -> Result<Value, ErrorKind> {
        let mut interpreter = Interpreter::with_default_modules();
        interpreter.set_source(format!("result = {source}"));
        if interpreter.run() {
            Ok(interpreter.vars["result"].clone())
        } else {
            Err(interpreter.last_error().map_or(ErrorKind::UnknownError, |e| e.kind))
        }
    }

    fn shows(source: &str) -> String {
        eval(source).map(|v| v.to_string()).unwrap_or_else(|kind| format!("error {kind}"))
    }

    #[test]
    fn precedence() {
        assert_eq!(shows("1+2*2"), "5");
        assert_eq!(shows("(1+2)*2"), "6");
        assert_eq!(shows("-2**2"), "-4");
        assert_eq!(shows("(-2)**2"), "4");
        assert_eq!(shows("2**3**2"), "512");
        assert_eq!(shows("2**-1"), "0.5");
        assert_eq!(shows("1 + 2 << 1"), "6");
        assert_eq!(shows("6 & 3 | 8"), "10");
        assert_eq!(shows("1 | 6 ^ 3"), "5");
    }

    #[test]
    fn logic_and_comparison() {
        assert_eq!(shows("1 < 2 and 3 < 4"), "1");
        assert_eq!(shows("not 1 == 2"), "1");
        assert_eq!(shows("0 or 0"), "0");
        assert_eq!(shows("true and not false"), "1");
        assert_eq!(shows("not not 5"), "1");
    }

    #[test]
    fn literals_and_strings() {
        assert_eq!(shows("0xff + 0b1 + 0o7"), "263");
        assert_eq!(shows("'ab' + \"cd\""), "abcd");
        assert_eq!(shows("'x' + 1.50"), "x1.5");
        assert_eq!(shows("'ab' * 3"), "ababab");
    }

    #[test]
    fn grouping_errors() {
        assert_eq!(eval("(1 + 2"), Err(ErrorKind::MissingToken));
        assert_eq!(eval("1 +"), Err(ErrorKind::UnexpectedToken));
        assert_eq!(eval("1 $ 2"), Err(ErrorKind::UnknownToken));
        assert_eq!(eval("(1 $)"), Err(ErrorKind::UnknownToken));
        assert_eq!(eval("$"), Err(ErrorKind::UnknownToken));
    }

    #[test]
    fn results_must_fit_in_64_bits() {
        assert_eq!(eval("9223372036854775807 + 1"), Err(ErrorKind::NumberOverflow));
        assert_eq!(shows("9223372036854775807 * 2 / 2"), "9223372036854775807");
        assert_eq!(shows("0x8000000000000000"), "-9223372036854775808");
    }
}
