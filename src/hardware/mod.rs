mod clock;
mod cpu;
mod interrupt;
mod io_device;
mod memory;
mod mmu;
mod timer;

use std::fmt;

pub use clock::{Clock, Subscriber};
pub use cpu::{Cpu, Instruction};
pub use interrupt::{Handler, InterruptVector, Irq, IrqKind};
pub use io_device::{IoDevice, PRINTER_ID, PRINTER_TIME};
pub use memory::{Memory, MEMORY_SIZE};
pub use mmu::{Mmu, DEFAULT_LIMIT};
pub use timer::Timer;

use crate::config::Config;

/// The "motherboard": every hardware unit the kernel runs on. Built once and
/// handed to the kernel by reference.
pub struct Hardware {
    pub memory: Memory,
    pub mmu: Mmu,
    pub cpu: Cpu,
    pub io_device: IoDevice,
    pub timer: Timer,
    pub clock: Clock,
}

impl Hardware {
    pub fn setup(config: &Config) -> Hardware {
        let mut clock = Clock::new();
        clock.add_subscriber(Subscriber::Timer);
        clock.add_subscriber(Subscriber::IoDevice);

        Hardware {
            memory: Memory::new(config.memory_size),
            mmu: Mmu::new(config.mmu_limit),
            cpu: Cpu::new(),
            io_device: IoDevice::printer(config.io_device_time),
            timer: Timer::new(),
            clock,
        }
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HARDWARE state {} MMU(base={})", self.cpu, self.mmu.base_address())?;
        for (address, cell) in self.memory.cells().iter().enumerate() {
            if let Some(instruction) = cell {
                write!(f, "\n  {:>4} | {}", address, instruction)?;
            }
        }
        Ok(())
    }
}
