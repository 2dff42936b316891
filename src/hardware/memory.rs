use super::Instruction;

pub const MEMORY_SIZE: usize = 64;

/// Main memory: a fixed number of instruction cells.
pub struct Memory {
    cells: Vec<Option<Instruction>>,
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory {
            cells: vec![None; size],
        }
    }

    pub fn read(&self, address: usize) -> Option<Instruction> {
        if address >= self.cells.len() {
            panic!("Out of bounds memory access. Address {} is greater than memory size", address);
        }

        self.cells[address]
    }

    pub fn write(&mut self, address: usize, value: Instruction) {
        if address >= self.cells.len() {
            panic!("Out of bounds memory access. Address {} is greater than memory size", address);
        }

        self.cells[address] = Some(value);
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Option<Instruction>] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new(MEMORY_SIZE)
    }
}
