mod display;
mod error;
mod font;
mod instruction;
mod keystate;
mod memory;
mod options;
mod processor;
mod program;
mod stack;

// Re-exports
pub use crate::display::{
    Display, HIGH_RES_HEIGHT_PIXELS, HIGH_RES_WIDTH_PIXELS, LOW_RES_HEIGHT_PIXELS,
    LOW_RES_WIDTH_PIXELS,
};
pub use crate::error::*;
pub use crate::memory::Memory;
pub use crate::options::Options;
pub use crate::options::DEFAULT_CYCLES_PER_FRAME;
pub use crate::processor::*;
pub use crate::program::Program;
pub use crate::stack::Stack;
