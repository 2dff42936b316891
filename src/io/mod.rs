pub mod gantt;
pub mod program;

pub use program::{asm, Program};
