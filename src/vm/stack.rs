use std::fmt;

/// Capacity of the runtime stack, in byte cells.
pub const STACK_SIZE: usize = 500;

/// Failure modes of the bounded stack. Nothing in the VM recovers from
/// these; the CLI boundary turns them into a diagnostic and a non-zero
/// exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    Overflow,
    Underflow,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Overflow => write!(f, "Stack overflow"),
            StackError::Underflow => write!(f, "Stack underflow"),
        }
    }
}

impl std::error::Error for StackError {}

/// Fixed-capacity LIFO store of byte cells.
///
/// The cursor always equals the number of live elements; a failed push or
/// pop leaves the stack untouched.
pub struct Stack {
    data: [i8; STACK_SIZE],
    pointer: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            data: [0; STACK_SIZE],
            pointer: 0,
        }
    }

    /// Push a value onto the stack.
    #[inline]
    pub fn push(&mut self, value: i8) -> Result<(), StackError> {
        if self.pointer >= STACK_SIZE {
            return Err(StackError::Overflow);
        }
        self.data[self.pointer] = value;
        self.pointer += 1;
        Ok(())
    }

    /// Pop the most recently pushed value.
    #[inline]
    pub fn pop(&mut self) -> Result<i8, StackError> {
        if self.pointer == 0 {
            return Err(StackError::Underflow);
        }
        self.pointer -= 1;
        Ok(self.data[self.pointer])
    }

    /// Whether the stack is at capacity; serves the `isFull` instruction.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pointer >= STACK_SIZE
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
