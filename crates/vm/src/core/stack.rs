use std::{collections::VecDeque, fmt::Display};

use evmi_common::utils::strings::encode_hex;

use crate::error::Fault;

use super::word::{Word, WordExt};

/// The maximum number of items the stack may hold.
pub const STACK_LIMIT: usize = 1024;

/// The [`Stack`] struct represents the EVM operand stack.
/// It is a bounded LIFO data structure that holds a VecDeque of [`Word`]s.
///
/// The front of the deque is the top of the stack.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Stack {
    stack: VecDeque<Word>,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Creates a new, empty [`Stack`].
    ///
    /// ```
    /// use evmi_vm::core::stack::Stack;
    ///
    /// let stack = Stack::new();
    /// assert_eq!(stack.size(), 0);
    /// ```
    pub fn new() -> Stack {
        Stack { stack: VecDeque::with_capacity(STACK_LIMIT) }
    }

    /// Push a value onto the stack. Fails without modifying the stack if it is already full.
    ///
    /// ```
    /// use evmi_vm::{core::stack::Stack, Word};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Word::from(0x00)).expect("stack has room");
    /// assert_eq!(stack.size(), 1);
    /// ```
    pub fn push(&mut self, value: Word) -> Result<(), Fault> {
        if self.stack.len() >= STACK_LIMIT {
            return Err(Fault::StackOverflow);
        }
        self.stack.push_front(value);
        Ok(())
    }

    /// Pop a value off the stack.
    ///
    /// ```
    /// use evmi_vm::{core::stack::Stack, Fault, Word};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Word::from(0x01)).expect("stack has room");
    ///
    /// assert_eq!(stack.pop(), Ok(Word::from(0x01)));
    /// assert_eq!(stack.pop(), Err(Fault::StackUnderflow));
    /// ```
    pub fn pop(&mut self) -> Result<Word, Fault> {
        self.stack.pop_front().ok_or(Fault::StackUnderflow)
    }

    /// Ensures at least `n` items are on the stack, without touching them.
    pub fn require(&self, n: usize) -> Result<(), Fault> {
        if self.stack.len() < n {
            return Err(Fault::StackUnderflow);
        }
        Ok(())
    }

    /// Pop n values off the stack, top first. Either all n are popped or none are.
    ///
    /// ```
    /// use evmi_vm::{core::stack::Stack, Word};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Word::from(0x00)).unwrap();
    /// stack.push(Word::from(0x01)).unwrap();
    /// stack.push(Word::from(0x02)).unwrap();
    ///
    /// // stack is now [0x02, 0x01, 0x00]
    /// let values = stack.pop_n(2).unwrap();
    /// assert_eq!(values, vec![Word::from(0x02), Word::from(0x01)]);
    ///
    /// // stack is now [0x00]
    /// assert!(stack.pop_n(2).is_err());
    /// assert_eq!(stack.size(), 1);
    /// ```
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<Word>, Fault> {
        self.require(n)?;
        Ok(self.stack.drain(0..n).collect())
    }

    /// Swap the top value and the value at index `n` (`n` = 1 is the second item).
    ///
    /// ```
    /// use evmi_vm::{core::stack::Stack, Word};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Word::from(0x00)).unwrap();
    /// stack.push(Word::from(0x01)).unwrap();
    ///
    /// // stack is now [0x01, 0x00]
    /// stack.swap(1).unwrap();
    ///
    /// // stack is now [0x00, 0x01]
    /// assert_eq!(stack.peek(0), Ok(Word::from(0x00)));
    /// assert_eq!(stack.peek(1), Ok(Word::from(0x01)));
    /// ```
    pub fn swap(&mut self, n: usize) -> Result<(), Fault> {
        self.require(n + 1)?;
        self.stack.swap(0, n);
        Ok(())
    }

    /// Duplicate the nth value on the stack (`n` = 1 is the top) onto the top, leaving the
    /// existing items in place.
    ///
    /// ```
    /// use evmi_vm::{core::stack::Stack, Word};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Word::from(0x0a)).unwrap();
    /// stack.push(Word::from(0x0b)).unwrap();
    ///
    /// // stack is now [0x0b, 0x0a]
    /// stack.dup(2).unwrap();
    ///
    /// // stack is now [0x0a, 0x0b, 0x0a]
    /// assert_eq!(stack.pop_n(3).unwrap(), vec![Word::from(0x0a), Word::from(0x0b), Word::from(0x0a)]);
    /// ```
    pub fn dup(&mut self, n: usize) -> Result<(), Fault> {
        if n == 0 {
            return Err(Fault::StackUnderflow);
        }
        let item = self.peek(n - 1)?;
        self.push(item)
    }

    /// Peek at the value at `index`, where 0 is the top of the stack.
    pub fn peek(&self, index: usize) -> Result<Word, Fault> {
        self.stack.get(index).copied().ok_or(Fault::StackUnderflow)
    }

    /// Gets up to the top n values of the stack, top first.
    pub fn peek_n(&self, n: usize) -> Vec<Word> {
        self.stack.iter().take(n).copied().collect()
    }

    /// Get the size of the stack
    pub fn size(&self) -> usize {
        self.stack.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterates over the stack from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Word> + '_ {
        self.stack.iter()
    }

    /// Renders each item, top to bottom, as 32 bytes of lowercase hex.
    pub fn render(&self) -> Vec<String> {
        self.stack.iter().map(|word| encode_hex(&word.to_be_word_bytes())).collect()
    }
}

impl Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self.stack.iter().map(|value| format!("{value:#x}")).collect::<Vec<_>>();
        write!(f, "[{}]", values.join(", "))
    }
}
