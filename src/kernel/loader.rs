use log::debug;

use crate::error::{Fault, Result};
use crate::hardware::Memory;
use crate::io::Program;

/// Writes programs into consecutive memory cells. Memory is never reclaimed,
/// so base addresses only grow.
pub struct Loader {
    base_address: usize,
}

impl Loader {
    pub fn new() -> Loader {
        Loader { base_address: 0 }
    }

    /// Loads the program and returns the base address assigned to it.
    pub fn load_program(&mut self, program: &Program, memory: &mut Memory) -> Result<usize> {
        let available = self.remaining_memory(memory);
        if available < program.len() {
            return Err(Fault::MemoryExhausted {
                program: program.name().to_string(),
                needed: program.len(),
                available,
            });
        }

        let base_address = self.base_address;
        for (offset, instruction) in program.instructions().iter().enumerate() {
            memory.write(base_address + offset, *instruction);
        }
        self.base_address += program.len();

        debug!("loader - {} loaded at {}", program.name(), base_address);
        Ok(base_address)
    }

    pub fn remaining_memory(&self, memory: &Memory) -> usize {
        memory.size().saturating_sub(self.base_address)
    }
}

impl Default for Loader {
    fn default() -> Loader {
        Loader::new()
    }
}
