//! Executes tokens against a stack.

use super::*;
use log::{debug, trace};


/// What happened while running one chunk.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChunkReport {
    /// Number of tokens executed.
    pub executed: usize,
    /// The last token executed was a display command (`print`, `list`,
    /// `dump`), so the caller can skip its own summary.
    pub displayed: bool,
}

/// A stack machine. The stack persists across chunks.
#[derive(Clone, Debug, Default)]
pub struct Machine {
    stack: Stack,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Tokenizes `script` and executes it. Display output goes to `emit`, one
    /// call per rendered block.
    ///
    /// The whole chunk is tokenized first, so a chunk that does not tokenize
    /// leaves the stack untouched. A fault while executing stops the chunk;
    /// values popped by the faulting token are lost, earlier effects remain.
    pub fn run(&mut self, script: &str, emit: &mut dyn FnMut(&str)) -> Result<ChunkReport> {
        let tokens = tokenize(script)?;
        debug!("running {} tokens", tokens.len());
        let mut report = ChunkReport::default();
        for token in tokens {
            self.execute(token, emit)?;
            report.executed += 1;
            report.displayed = matches!(token, Token::Word(w) if w.is_display());
        }
        Ok(report)
    }

    /// Executes a single token.
    pub fn execute(&mut self, token: Token, emit: &mut dyn FnMut(&str)) -> Result<()> {
        trace!("execute {:?} on {} values", token, self.stack.len());
        let word = match token {
            Token::Value(n) => {
                self.stack.push(n);
                return Ok(());
            }
            Token::Word(word) => word,
        };

        match word {
            Word::Binary(op) => {
                let x = self.stack.pop()?;
                let y = self.stack.pop()?;
                self.stack.push(op.apply(y, x)?);
            }
            Word::Unary(op) => {
                let x = self.stack.pop()?;
                self.stack.push(op.apply(x));
            }
            Word::Dup => {
                let x = self.stack.pop()?;
                self.stack.push(x);
                self.stack.push(x);
            }
            Word::Swap => {
                let x = self.stack.pop()?;
                let y = self.stack.pop()?;
                self.stack.push(x);
                self.stack.push(y);
            }
            Word::Drop => {
                if self.stack.pop().is_err() {
                    emit(EMPTY);
                }
            }
            Word::Print => emit(&print_top(self.stack.as_slice())),
            Word::List => emit(&list(self.stack.as_slice())),
            Word::Dump => emit(&dump(self.stack.as_slice())),
        }
        Ok(())
    }
}
