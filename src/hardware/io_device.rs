use log::{debug, trace};

use super::{Instruction, Irq};
use crate::error::{Fault, Result};

pub const PRINTER_ID: &str = "Printer";
pub const PRINTER_TIME: u32 = 3;

/// A single exclusive-use peripheral that needs a fixed number of ticks to
/// finish an operation. It has no queue: that is the controller's job.
pub struct IoDevice {
    id: &'static str,
    duration: u32,
    busy: bool,
    ticks_count: u32,
    operation: Option<Instruction>,
}

impl IoDevice {
    pub fn new(id: &'static str, duration: u32) -> IoDevice {
        IoDevice {
            id,
            duration,
            busy: false,
            ticks_count: 0,
            operation: None,
        }
    }

    pub fn printer(duration: u32) -> IoDevice {
        IoDevice::new(PRINTER_ID, duration)
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_idle(&self) -> bool {
        !self.busy
    }

    pub fn operation(&self) -> Option<Instruction> {
        self.operation
    }

    pub fn execute(&mut self, operation: Instruction) -> Result<()> {
        if self.busy {
            return Err(Fault::DeviceBusy {
                device: self.id,
                operation,
            });
        }

        debug!("device {} - Start: {}", self.id, operation);
        self.busy = true;
        self.ticks_count = 0;
        self.operation = Some(operation);
        Ok(())
    }

    /// Advances the operation in service and reports its completion.
    pub fn tick(&mut self) -> Option<Irq> {
        if !self.busy {
            return None;
        }

        self.ticks_count += 1;
        if self.ticks_count > self.duration {
            debug!("device {} - Finished: {:?}", self.id, self.operation);
            self.busy = false;
            self.operation = None;
            Some(Irq::IoOut(self.id))
        } else {
            trace!("device {} - Busy: {} of {}", self.id, self.ticks_count, self.duration);
            None
        }
    }
}
