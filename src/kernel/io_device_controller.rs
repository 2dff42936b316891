use std::collections::VecDeque;
use std::fmt;

use super::Pid;
use crate::error::Result;
use crate::hardware::{Instruction, IoDevice};

/// Driver for the I/O device: queues requests in arrival order while the
/// device is busy and keeps track of the one in service.
pub struct IoDeviceController {
    waiting_queue: VecDeque<(Pid, Instruction)>,
    current: Option<Pid>,
}

impl IoDeviceController {
    pub fn new() -> IoDeviceController {
        IoDeviceController {
            waiting_queue: VecDeque::new(),
            current: None,
        }
    }

    pub fn run_operation(&mut self, device: &mut IoDevice, pid: Pid, instruction: Instruction) -> Result<()> {
        self.waiting_queue.push_back((pid, instruction));
        self.load_from_waiting_queue(device)
    }

    /// Returns the process whose operation just finished and starts the next
    /// queued request, if any.
    pub fn get_finished_pcb(&mut self, device: &mut IoDevice) -> Result<Option<Pid>> {
        let finished = self.current.take();
        self.load_from_waiting_queue(device)?;
        Ok(finished)
    }

    pub fn in_service(&self) -> Option<Pid> {
        self.current
    }

    pub fn waiting(&self) -> impl Iterator<Item = Pid> + '_ {
        self.waiting_queue.iter().map(|(pid, _)| *pid)
    }

    fn load_from_waiting_queue(&mut self, device: &mut IoDevice) -> Result<()> {
        if self.current.is_some() || device.is_busy() {
            return Ok(());
        }

        if let Some((pid, instruction)) = self.waiting_queue.pop_front() {
            device.execute(instruction)?;
            self.current = Some(pid);
        }
        Ok(())
    }
}

impl Default for IoDeviceController {
    fn default() -> IoDeviceController {
        IoDeviceController::new()
    }
}

impl fmt::Display for IoDeviceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let waiting: Vec<Pid> = self.waiting().collect();
        write!(f, "IoDeviceController running: {:?} waiting: {:?}", self.current, waiting)
    }
}
