use std::fmt;

use log::{debug, trace};

use super::{Irq, Memory, Mmu};
use crate::error::Result;

/// The instruction set understood by the emulated CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Cpu,
    Io,
    Exit,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Cpu => write!(f, "CPU"),
            Instruction::Io => write!(f, "IO"),
            Instruction::Exit => write!(f, "EXIT"),
        }
    }
}

/// Central processing unit. Runs one fetch/decode/execute cycle per tick for
/// the loaded process. It never changes process state itself: I/O and exit
/// are reported as interrupt requests for the kernel.
pub struct Cpu {
    pc: Option<usize>,
    ir: Option<Instruction>,
    enable_stats: bool,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            pc: None,
            ir: None,
            enable_stats: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pc.is_some()
    }

    pub fn pc(&self) -> Option<usize> {
        self.pc
    }

    pub fn set_pc(&mut self, pc: Option<usize>) {
        self.pc = pc;
    }

    pub fn ir(&self) -> Option<Instruction> {
        self.ir
    }

    pub fn enable_stats(&self) -> bool {
        self.enable_stats
    }

    pub fn set_enable_stats(&mut self, enable_stats: bool) {
        self.enable_stats = enable_stats;
    }

    /// The statistics interrupt raised at the start of every tick, if enabled.
    pub fn stats(&self) -> Option<Irq> {
        self.enable_stats.then_some(Irq::Stat)
    }

    /// Runs one cycle and returns the interrupt the executed instruction raises.
    pub fn cycle(&mut self, mmu: &Mmu, memory: &Memory) -> Result<Option<Irq>> {
        let Some(pc) = self.pc else {
            trace!("cpu - NOOP");
            return Ok(None);
        };

        // Fetch.
        self.ir = mmu.fetch(memory, pc)?;
        self.pc = Some(pc + 1);

        let instruction = Cpu::decode(self.ir);

        Ok(self.execute(instruction, mmu))
    }

    fn decode(cell: Option<Instruction>) -> Instruction {
        // Unwritten cells behave as a plain CPU burst.
        cell.unwrap_or(Instruction::Cpu)
    }

    fn execute(&self, instruction: Instruction, mmu: &Mmu) -> Option<Irq> {
        match instruction {
            Instruction::Exit => Some(Irq::Kill),
            Instruction::Io => Some(Irq::IoIn(instruction)),
            Instruction::Cpu => {
                debug!(
                    "cpu - Exec: {}, PC={}, MMU={}",
                    instruction,
                    self.pc.unwrap_or_default(),
                    mmu.base_address()
                );
                None
            }
        }
    }
}

impl Default for Cpu {
    fn default() -> Cpu {
        Cpu::new()
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pc {
            Some(pc) => write!(f, "CPU(PC={})", pc),
            None => write!(f, "CPU(idle)"),
        }
    }
}
