use tracing::trace;

use crate::{
    error::{EvalResult, ScriptError},
    interpreter::{evaluator::core::Interpreter, event::Event, lexer::TokenKind, statement::Flow},
};

impl Interpreter {
    /// Executes the statement starting at the current token.
    ///
    /// Blank lines are consumed without counting as statements. At the end
    /// of the input every compound statement must have been closed.
    ///
    /// # Errors
    /// - `MissingToken` if the input ends inside a block.
    /// - Whatever the statement raises.
    pub(crate) fn execute_statement(&mut self) -> EvalResult<Flow> {
        let token = self.lexer.token().clone();
        match token.kind {
            TokenKind::NewLine => {
                self.advance()?;
                return Ok(Flow::Next);
            },
            TokenKind::Eof if self.clauses.is_empty() => return Ok(Flow::Finished),
            TokenKind::Eof => return Err(ScriptError::missing_token("end").at(token.location)),
            _ => {},
        }

        self.stats.statements += 1;
        trace!(kind = %token.kind, location = %token.location, "statement");
        match token.kind {
            TokenKind::If => self.exec_if()?,
            TokenKind::Elif | TokenKind::Else => self.exec_branch_end()?,
            TokenKind::End => self.exec_end()?,
            TokenKind::For => self.exec_for()?,
            TokenKind::Repeat => self.exec_repeat()?,
            TokenKind::Break => self.exec_break()?,
            TokenKind::Continue => self.exec_continue()?,
            TokenKind::Exit => {
                self.advance()?;
                return Ok(Flow::Finished);
            },
            TokenKind::Identifier if self.lexer.next_token().kind == TokenKind::Assign => {
                self.exec_assignment()?;
            },
            _ => self.exec_expression()?,
        }
        Ok(Flow::Next)
    }

    /// `name = expression`
    fn exec_assignment(&mut self) -> EvalResult<()> {
        let target = self.lexer.token().clone();
        self.ensure_assignable(&target.text)
            .map_err(|e| e.at(target.location))?;
        self.advance()?;
        self.advance()?;

        let value = self.eval_expression()?;
        self.expect_end_of_statement()?;
        self.emit(&Event::Assigning { name:  &target.text,
                                      value: &value, });
        self.vars.insert(target.text, value);
        Ok(())
    }

    fn exec_expression(&mut self) -> EvalResult<()> {
        let value = self.eval_expression()?;
        self.expect_end_of_statement()?;
        self.emit(&Event::Output(&value));
        Ok(())
    }
}
