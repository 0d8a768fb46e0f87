use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{
        evaluator::core::{Clause, Interpreter},
        lexer::TokenKind,
    },
};

impl Interpreter {
    /// Moves forward to the `end` closing the current block, or to a
    /// same-level `elif` / `else` when `stop_at_branch` is set.
    ///
    /// Nested `if`, `for` and `repeat` blocks are skipped whole. Skipped
    /// tokens are not counted in the statistics. The lexer is left on the
    /// keyword that stopped the scan.
    ///
    /// # Errors
    /// `MissingToken` if the input ends first.
    pub(crate) fn skip_block(&mut self, stop_at_branch: bool) -> EvalResult<TokenKind> {
        let mut depth = 0_usize;
        loop {
            let token = self.lexer.token();
            match token.kind {
                TokenKind::If | TokenKind::For | TokenKind::Repeat => depth += 1,
                TokenKind::End if depth == 0 => return Ok(TokenKind::End),
                TokenKind::End => depth -= 1,
                TokenKind::Elif | TokenKind::Else if depth == 0 && stop_at_branch => {
                    return Ok(token.kind);
                },
                TokenKind::Eof => return Err(ScriptError::missing_token("end").at(token.location)),
                _ => {},
            }
            self.lexer.advance()?;
        }
    }

    /// `if condition`
    pub(crate) fn exec_if(&mut self) -> EvalResult<()> {
        let token = self.lexer.token().clone();
        self.advance()?;
        let condition = self.eval_expression()?;
        self.expect_end_of_statement()?;
        self.clauses.push(Clause { token,
                                   loop_variable: None });
        if condition.is_truthy() {
            Ok(())
        } else {
            self.take_next_branch()
        }
    }

    /// Finds the branch to run after a false condition: the first `elif`
    /// whose condition holds, an `else`, or nothing.
    fn take_next_branch(&mut self) -> EvalResult<()> {
        loop {
            match self.skip_block(true)? {
                TokenKind::Elif => {
                    self.advance()?;
                    let condition = self.eval_expression()?;
                    self.expect_end_of_statement()?;
                    if condition.is_truthy() {
                        return Ok(());
                    }
                },
                TokenKind::Else => {
                    self.advance()?;
                    return self.expect_end_of_statement();
                },
                _ => {
                    self.advance()?;
                    self.clauses.pop();
                    return self.expect_end_of_statement();
                },
            }
        }
    }

    /// An `elif` or `else` reached at the end of a branch that ran. The rest
    /// of the `if` is skipped.
    pub(crate) fn exec_branch_end(&mut self) -> EvalResult<()> {
        if self.clauses.last().is_none_or(|clause| clause.token.kind != TokenKind::If) {
            return Err(ScriptError::unexpected_token(self.lexer.token()));
        }
        self.skip_block(false)?;
        self.advance()?;
        self.clauses.pop();
        self.expect_end_of_statement()
    }
}
