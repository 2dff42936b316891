use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::hardware::{Hardware, InterruptVector, Irq, Subscriber};
use crate::io::Program;
use crate::kernel::Kernel;

/// The hardware, its interrupt vector and the kernel running on it.
///
/// Hardware units report the interrupts they raise back to the machine, which
/// delivers each one through the vector and waits for the handler to finish
/// before the tick goes on.
pub struct Machine {
    hardware: Hardware,
    interrupts: InterruptVector<Kernel>,
    kernel: Kernel,
}

impl Machine {
    pub fn new(config: &Config) -> Machine {
        let mut hardware = Hardware::setup(config);
        let mut interrupts = InterruptVector::new();
        let kernel = Kernel::new(&mut hardware, &mut interrupts, config.scheduling_algorithm);

        Machine {
            hardware,
            interrupts,
            kernel,
        }
    }

    pub fn hardware(&self) -> &Hardware {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut Hardware {
        &mut self.hardware
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn interrupts(&self) -> &InterruptVector<Kernel> {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptVector<Kernel> {
        &mut self.interrupts
    }

    /// System call for program execution.
    pub fn run(&mut self, program: Program, priority: u8) -> Result<()> {
        self.raise(Irq::New { program, priority })
    }

    pub fn raise(&mut self, irq: Irq) -> Result<()> {
        self.interrupts.handle(&mut self.kernel, &mut self.hardware, &irq)?;
        self.kernel.pcb_table().verify()
    }

    /// Runs one clock tick, notifying every subscriber in order. Returns the
    /// number of the tick.
    pub fn tick(&mut self) -> Result<u64> {
        let tick = self.hardware.clock.begin_tick();
        info!("        --------------- tick: {} ---------------", tick);

        let subscribers = self.hardware.clock.subscribers().to_vec();
        for subscriber in subscribers {
            match subscriber {
                Subscriber::Timer => self.tick_timer()?,
                Subscriber::IoDevice => self.tick_io_device()?,
            }
        }

        self.hardware.clock.end_tick();
        Ok(tick)
    }

    pub fn do_ticks(&mut self, times: u64) -> Result<()> {
        info!("---- :::: CLOCK do_ticks: {} ::: -----", times);
        for _ in 0..times {
            self.tick()?;
        }
        Ok(())
    }

    fn tick_timer(&mut self) -> Result<()> {
        if let Some(irq) = self.hardware.timer.poll(self.hardware.cpu.is_busy()) {
            self.raise(irq)?;
        }
        self.hardware.timer.record_tick();
        self.tick_cpu()
    }

    fn tick_cpu(&mut self) -> Result<()> {
        if let Some(irq) = self.hardware.cpu.stats() {
            self.raise(irq)?;
        }

        let hardware = &mut self.hardware;
        if let Some(irq) = hardware.cpu.cycle(&hardware.mmu, &hardware.memory)? {
            self.raise(irq)?;
        }
        Ok(())
    }

    fn tick_io_device(&mut self) -> Result<()> {
        if let Some(irq) = self.hardware.io_device.tick() {
            self.raise(irq)?;
        }
        Ok(())
    }
}
