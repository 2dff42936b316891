use std::fmt;

use crate::error::{Fault, Result};

pub type Pid = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Waiting,
    Terminated,
}

impl ProcessState {
    fn can_become(self, next: ProcessState) -> bool {
        use ProcessState::*;

        matches!(
            (self, next),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Waiting)
                | (Running, Terminated)
                | (Waiting, Ready)
                | (Waiting, Running)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::New => "new",
            ProcessState::Ready => "ready",
            ProcessState::Running => "running",
            ProcessState::Waiting => "waiting",
            ProcessState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// The process control block. Holds the saved context and bookkeeping of one
/// admitted program.
#[derive(Debug, Clone)]
pub struct ProcessControlBlock {
    pub program_counter: usize,
    pub enqueue_tick: u64,

    pid: Pid,
    name: String,
    base_address: usize,
    priority: u8,
    state: ProcessState,
}

impl ProcessControlBlock {
    pub fn new(pid: Pid, name: impl Into<String>, base_address: usize, priority: u8) -> ProcessControlBlock {
        ProcessControlBlock {
            pid,
            name: name.into(),
            base_address,
            priority,
            program_counter: 0,
            enqueue_tick: 0,
            state: ProcessState::New,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_address(&self) -> usize {
        self.base_address
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Moves the process along its lifecycle, rejecting illegal transitions.
    pub fn set_state(&mut self, state: ProcessState) -> Result<()> {
        if !self.state.can_become(state) {
            return Err(Fault::invariant(format!(
                "pid {} can't go from {} to {}",
                self.pid, self.state, state
            )));
        }

        self.state = state;
        Ok(())
    }
}

impl fmt::Display for ProcessControlBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID {} ({}), State: {}", self.pid, self.name, self.state)
    }
}
