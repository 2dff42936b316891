use std::fmt;

use crate::hardware::Instruction;

/// A compiled program: a display name and a flat instruction sequence that
/// always ends in `Exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(name: impl Into<String>, instructions: impl IntoIterator<Item = Instruction>) -> Program {
        let mut instructions: Vec<Instruction> = instructions.into_iter().collect();

        if instructions.last() != Some(&Instruction::Exit) {
            instructions.push(Instruction::Exit);
        }

        Program {
            name: name.into(),
            instructions,
        }
    }

    /// Builds a program out of instruction groups, flattening them in order.
    pub fn from_blocks(name: impl Into<String>, blocks: Vec<Vec<Instruction>>) -> Program {
        Program::new(name, blocks.into_iter().flatten())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({}, {:?})", self.name, self.instructions)
    }
}

/// Helpers for writing emulated machine code.
pub mod asm {
    use crate::hardware::Instruction;

    pub fn cpu(times: usize) -> Vec<Instruction> {
        vec![Instruction::Cpu; times]
    }

    pub fn io() -> Vec<Instruction> {
        vec![Instruction::Io]
    }

    pub fn exit(times: usize) -> Vec<Instruction> {
        vec![Instruction::Exit; times]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn test_program_appends_exit() {
        let program = Program::new("test.exe", vec![Cpu, Io]);
        assert_eq!(program.instructions(), &[Cpu, Io, Exit]);
    }

    #[test]
    fn test_program_keeps_trailing_exit() {
        let program = Program::new("test.exe", vec![Cpu, Exit]);
        assert_eq!(program.instructions(), &[Cpu, Exit]);
    }

    #[test]
    fn test_program_from_blocks_flattens() {
        let program = Program::from_blocks("prg1.exe", vec![asm::cpu(2), asm::io(), asm::cpu(3)]);
        assert_eq!(program.instructions(), &[Cpu, Cpu, Io, Cpu, Cpu, Cpu, Exit]);
        assert_eq!(program.len(), 7);
        assert_eq!(program.name(), "prg1.exe");
    }

    #[test]
    fn test_empty_program_is_just_exit() {
        let program = Program::new("empty.exe", Vec::new());
        assert_eq!(program.instructions(), &[Exit]);
    }
}
