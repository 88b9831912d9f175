//! Operand stack for script evaluation
//!
//! A LIFO container addressed relative to the top: offset -1 is the top
//! element, -2 the one below it, and so on. It carries no opcode semantics
//! or limits; the interpreter enforces those around it.

use crate::error::{PrimitiveError, Result};
use crate::types::ByteString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStack<T = ByteString> {
    stack: Vec<T>,
}

impl<T> ScriptStack<T> {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, value: T) -> &mut Self {
        self.stack.push(value);
        self
    }

    pub fn pop(&mut self) -> Result<T> {
        self.stack.pop().ok_or(PrimitiveError::StackUnderflow)
    }

    /// index = len + offset, if it names an existing slot
    fn index_for(&self, offset: i64) -> Option<usize> {
        let index = (self.stack.len() as i64).checked_add(offset)?;
        usize::try_from(index).ok().filter(|&i| i < self.stack.len())
    }

    /// Element at `offset` from just past the top
    pub fn top(&self, offset: i64) -> Result<&T> {
        self.index_for(offset)
            .map(|index| &self.stack[index])
            .ok_or(PrimitiveError::InvalidStackPosition(offset))
    }

    /// Overwrite an existing slot
    pub fn set(&mut self, offset: i64, value: T) -> Result<()> {
        let index = self
            .index_for(offset)
            .ok_or(PrimitiveError::InvalidStackPosition(offset))?;
        self.stack[index] = value;
        Ok(())
    }

    /// Remove the slot at `offset`; deeper elements keep their order
    pub fn erase(&mut self, offset: i64) -> Result<T> {
        let index = self
            .index_for(offset)
            .ok_or(PrimitiveError::MissingStackValue(offset))?;
        Ok(self.stack.remove(index))
    }

    /// Contents bottom to top
    pub fn dump(&self) -> &[T] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.stack.iter()
    }
}

impl<T> Default for ScriptStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
