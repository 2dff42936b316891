use thiserror::Error;

use crate::hardware::{Instruction, IrqKind};

pub type Result<T> = std::result::Result<T, Fault>;

/// Failures raised while ticking the machine or handling an interrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("invalid address, {logical} is higher than process limit: {limit}")]
    AddressFault { logical: usize, limit: usize },

    #[error("device {device} is busy, can't execute operation: {operation}")]
    DeviceBusy {
        device: &'static str,
        operation: Instruction,
    },

    #[error("no handler found for irq type: {0}")]
    UnregisteredInterrupt(IrqKind),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("not enough memory to load {program}: needs {needed} cells, {available} available")]
    MemoryExhausted {
        program: String,
        needed: usize,
        available: usize,
    },
}

impl Fault {
    pub(crate) fn invariant(message: impl Into<String>) -> Fault {
        Fault::InvariantViolation(message.into())
    }
}

/// Failures parsing command line configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown scheduling algorithm: {0} (expected fifo, priority, priority-preemptive or round-robin)")]
    UnknownAlgorithm(String),

    #[error("invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}
