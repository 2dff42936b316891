//! Short-term scheduling policies.
//!
//! Every policy owns its ready structure and answers the same questions: where
//! a ready process goes, which one runs next, and whether a newcomer should
//! take the CPU away from the running process.

mod fifo;
mod priority;
mod round_robin;

use std::fmt;
use std::str::FromStr;

pub use fifo::FifoScheduler;
pub use priority::{PriorityScheduler, AGING_TICKS, PRIORITY_LEVELS};
pub use round_robin::{RoundRobinScheduler, ROUND_ROBIN_QUANTUM};

use super::{Pid, ProcessControlBlock};
use crate::error::ConfigError;

/// A process waiting in a ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyEntry {
    pub pid: Pid,
    pub priority: u8,
    pub enqueue_tick: u64,
}

impl From<&ProcessControlBlock> for ReadyEntry {
    fn from(pcb: &ProcessControlBlock) -> ReadyEntry {
        ReadyEntry {
            pid: pcb.pid(),
            priority: pcb.priority(),
            enqueue_tick: pcb.enqueue_tick,
        }
    }
}

pub trait Scheduler: Send {
    fn name(&self) -> &'static str;

    fn add(&mut self, entry: ReadyEntry);

    fn next_in_queue(&mut self) -> Option<ReadyEntry>;

    fn is_empty(&self) -> bool;

    /// Entries in the order they would be dequeued.
    fn ready(&self) -> Vec<ReadyEntry>;

    fn must_expropriate(&self, _running: &ProcessControlBlock, _incoming: &ProcessControlBlock) -> bool {
        false
    }

    /// Called once per statistics interrupt with the current tick.
    fn check_tick(&mut self, _now: u64) {}

    /// Quantum the timer must be armed with, for time-sliced policies.
    fn quantum(&self) -> Option<u32> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingAlgorithm {
    Fifo,
    Priority,
    PriorityPreemptive,
    RoundRobin,
}

impl SchedulingAlgorithm {
    pub fn build(self) -> Box<dyn Scheduler> {
        match self {
            SchedulingAlgorithm::Fifo => Box::new(FifoScheduler::new()),
            SchedulingAlgorithm::Priority => Box::new(PriorityScheduler::non_preemptive()),
            SchedulingAlgorithm::PriorityPreemptive => Box::new(PriorityScheduler::preemptive()),
            SchedulingAlgorithm::RoundRobin => Box::new(RoundRobinScheduler::new(ROUND_ROBIN_QUANTUM)),
        }
    }
}

impl FromStr for SchedulingAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<SchedulingAlgorithm, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(SchedulingAlgorithm::Fifo),
            "priority" => Ok(SchedulingAlgorithm::Priority),
            "priority-preemptive" => Ok(SchedulingAlgorithm::PriorityPreemptive),
            "round-robin" | "rr" => Ok(SchedulingAlgorithm::RoundRobin),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulingAlgorithm::Fifo => "FIFO",
            SchedulingAlgorithm::Priority => "Priority",
            SchedulingAlgorithm::PriorityPreemptive => "Priority (preemptive)",
            SchedulingAlgorithm::RoundRobin => "Round Robin",
        };
        f.write_str(name)
    }
}
