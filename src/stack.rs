use crate::error::ErrorDetail;

/// The call stack depth (number of return addresses it can hold).
pub(crate) const STACK_DEPTH: usize = 32;

/// The subroutine call stack, holding return addresses.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack {
    /// The return address slots.
    pub bytes: [u16; STACK_DEPTH],
    /// The next free slot; 0 when the stack is empty.
    pub pointer: usize,
}

impl Stack {
    /// Constructor that returns an empty [Stack].
    pub(crate) fn new() -> Self {
        Stack {
            bytes: [0x0; STACK_DEPTH],
            pointer: 0,
        }
    }

    /// Pushes the specified 16-bit value on to the top of the stack.  If the stack is already
    /// full, returns [ErrorDetail::PushFullStack] and leaves the stack untouched.
    ///
    /// # Arguments
    ///
    /// * `value` - the value to push on to the stack
    pub fn push(&mut self, value: u16) -> Result<(), ErrorDetail> {
        if self.pointer >= STACK_DEPTH {
            return Err(ErrorDetail::PushFullStack);
        }
        self.bytes[self.pointer] = value;
        self.pointer += 1;
        Ok(())
    }

    /// Pops the top entry off the stack and returns it.  If the stack is already empty, returns
    /// [ErrorDetail::PopEmptyStack].
    pub fn pop(&mut self) -> Result<u16, ErrorDetail> {
        if self.pointer == 0 {
            return Err(ErrorDetail::PopEmptyStack);
        }
        self.pointer -= 1;
        Ok(self.bytes[self.pointer])
    }
}
