use super::{Instruction, Memory};
use crate::error::{Fault, Result};

pub const DEFAULT_LIMIT: usize = 999;

/// Memory management unit. Translates logical addresses of the loaded process
/// into physical ones with a base register, checking them against a limit.
pub struct Mmu {
    base_address: usize,
    limit: usize,
}

impl Mmu {
    pub fn new(limit: usize) -> Mmu {
        Mmu {
            base_address: 0,
            limit,
        }
    }

    pub fn base_address(&self) -> usize {
        self.base_address
    }

    pub fn set_base_address(&mut self, base_address: usize) {
        self.base_address = base_address;
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub fn fetch(&self, memory: &Memory, logical_address: usize) -> Result<Option<Instruction>> {
        if logical_address > self.limit {
            return Err(Fault::AddressFault {
                logical: logical_address,
                limit: self.limit,
            });
        }

        Ok(memory.read(self.base_address + logical_address))
    }
}

impl Default for Mmu {
    fn default() -> Mmu {
        Mmu::new(DEFAULT_LIMIT)
    }
}
