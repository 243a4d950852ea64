//! The operand stack.

use super::*;

/// An ordered sequence of values. The last element is the top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    values: Vec<Num>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Num) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Result<Num> {
        self.values.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn top(&self) -> Option<Num> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom first.
    pub fn as_slice(&self) -> &[Num] {
        &self.values
    }
}
