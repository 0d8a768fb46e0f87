use bigdecimal::BigDecimal;
use num_traits::One;

use crate::{
    error::{ErrorKind, EvalResult, ScriptError},
    interpreter::{
        evaluator::core::{Clause, Interpreter},
        lexer::{Token, TokenKind},
        operator::BinaryOperator,
        value::Value,
    },
};

/// Name of the hidden counter of the `repeat` loop whose keyword starts at
/// byte `index`. It cannot collide with a script identifier.
pub(crate) fn repeat_counter(index: usize) -> String {
    format!("@repeat{index}")
}

impl Interpreter {
    /// Whether `header` is the loop on top of the clause stack, reached again
    /// after a rewind.
    fn is_reentry(&self, header: &Token) -> bool {
        self.clauses.last().is_some_and(|clause| clause.token.location == header.location)
    }

    /// `for name = from to limit`
    ///
    /// `from` is evaluated on the first entry only. `limit` is evaluated
    /// before every iteration, and the loop ends once the variable exceeds
    /// it.
    pub(crate) fn exec_for(&mut self) -> EvalResult<()> {
        let header = self.lexer.token().clone();
        let reentry = self.is_reentry(&header);
        self.advance()?;

        let target = self.lexer.token().clone();
        if target.kind != TokenKind::Identifier {
            return Err(ScriptError::unexpected_token(&target));
        }
        self.advance()?;
        self.expect(TokenKind::Assign, "=")?;

        if reentry {
            self.skip_to_limit()?;
        } else {
            self.ensure_assignable(&target.text)
                .map_err(|e| e.at(target.location))?;
            let from = self.eval_expression()?;
            self.vars.insert(target.text.clone(), from);
        }
        self.expect(TokenKind::To, "to")?;
        let limit = self.eval_expression()?;
        self.expect_end_of_statement()?;

        if !reentry {
            self.clauses.push(Clause { token:         header,
                                       loop_variable: Some(target.text.clone()), });
        }
        let current = self.vars
                          .get(&target.text)
                          .ok_or_else(|| ScriptError::undeclared(&target.text))?;
        if Self::apply_binary(BinaryOperator::Greater, current, &limit)?.is_truthy() {
            self.leave_loop(0)?;
        }
        Ok(())
    }

    /// Passes over the `from` expression of a re-entered `for` header. Line
    /// breaks inside an argument list belong to the expression.
    fn skip_to_limit(&mut self) -> EvalResult<()> {
        let mut depth = 0usize;
        loop {
            match self.lexer.token().kind {
                TokenKind::To if depth == 0 => return Ok(()),
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::NewLine if depth > 0 => {},
                TokenKind::NewLine | TokenKind::Eof => {
                    return Err(ScriptError::missing_token("to").at(self.lexer.token().location));
                },
                _ => {},
            }
            self.lexer.advance()?;
        }
    }

    /// `repeat count`
    ///
    /// Runs the body while a hidden counter, starting at zero, is below
    /// `count`. The count is evaluated before every iteration.
    pub(crate) fn exec_repeat(&mut self) -> EvalResult<()> {
        let header = self.lexer.token().clone();
        let reentry = self.is_reentry(&header);
        let counter = repeat_counter(header.location.index);
        self.advance()?;

        let count = self.eval_expression()?;
        self.expect_end_of_statement()?;

        if !reentry {
            self.vars.insert(counter.clone(), Value::from(0));
            self.clauses.push(Clause { token:         header,
                                       loop_variable: Some(counter.clone()), });
        }
        let current = self.vars
                          .get(&counter)
                          .ok_or_else(|| ScriptError::undeclared(&counter))?;
        if Self::apply_binary(BinaryOperator::GreaterEqual, current, &count)?.is_truthy() {
            self.leave_loop(0)?;
        }
        Ok(())
    }

    /// `end`: closes an `if`, or steps a loop and rewinds to its header.
    pub(crate) fn exec_end(&mut self) -> EvalResult<()> {
        let Some(clause) = self.clauses.last() else {
            return Err(ScriptError::unexpected_token(self.lexer.token()));
        };
        let is_loop = clause.is_loop();
        self.advance()?;
        self.expect_end_of_statement()?;
        if is_loop {
            self.next_iteration()
        } else {
            self.clauses.pop();
            Ok(())
        }
    }

    /// `break`: leaves the innermost loop, closing the `if` blocks inside it.
    pub(crate) fn exec_break(&mut self) -> EvalResult<()> {
        let open_ifs = self.innermost_loop()?;
        self.advance()?;
        self.expect_end_of_statement()?;
        self.leave_loop(open_ifs)
    }

    /// `continue`: drops the `if` blocks inside the innermost loop and starts
    /// its next iteration.
    pub(crate) fn exec_continue(&mut self) -> EvalResult<()> {
        let open_ifs = self.innermost_loop()?;
        self.clauses.truncate(self.clauses.len() - open_ifs);
        self.advance()?;
        self.expect_end_of_statement()?;
        self.next_iteration()
    }

    /// Counts the `if` clauses above the innermost loop clause.
    ///
    /// # Errors
    /// `UnexpectedToken` at the current token when no loop is open.
    fn innermost_loop(&self) -> EvalResult<usize> {
        self.clauses
            .iter()
            .rposition(Clause::is_loop)
            .map(|position| self.clauses.len() - position - 1)
            .ok_or_else(|| ScriptError::unexpected_token(self.lexer.token()))
    }

    /// Skips past the `end` of the innermost loop, first closing `open_ifs`
    /// enclosing `if` blocks, and pops the loop clause. A hidden `repeat`
    /// counter is removed.
    fn leave_loop(&mut self, open_ifs: usize) -> EvalResult<()> {
        for _ in 0..open_ifs {
            self.skip_block(false)?;
            self.lexer.advance()?;
            self.clauses.pop();
        }
        self.skip_block(false)?;
        self.advance()?;
        if let Some(clause) = self.clauses.pop() {
            self.forget_counter(&clause);
        }
        self.expect_end_of_statement()
    }

    /// Steps the loop variable of the loop on top of the clause stack and
    /// rewinds to its header.
    ///
    /// # Errors
    /// - `UndeclaredIdentifier` if the variable was removed.
    /// - `InvalidDataType` if it no longer holds a number.
    fn next_iteration(&mut self) -> EvalResult<()> {
        let Some(clause) = self.clauses.last() else {
            return Err(ScriptError::new(ErrorKind::UnknownError, "No loop to continue"));
        };
        let header = clause.token.location;
        let name = clause.loop_variable.clone().unwrap_or_default();

        let current = self.vars.get(&name).ok_or_else(|| ScriptError::undeclared(&name))?;
        let next = Value::number(current.as_number()? + BigDecimal::one())
            .with_tag(current.tag.clone());
        self.vars.insert(name, next);
        self.lexer.move_to(header)
    }

    /// Removes the hidden counter of a `repeat` clause.
    pub(crate) fn forget_counter(&mut self, clause: &Clause) {
        if clause.token.kind == TokenKind::Repeat {
            if let Some(counter) = &clause.loop_variable {
                self.vars.remove(counter);
            }
        }
    }
}
