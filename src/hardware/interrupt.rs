use std::collections::HashMap;
use std::fmt;

use log::{info, warn};

use super::{Hardware, Instruction};
use crate::error::{Fault, Result};
use crate::io::Program;

/// Interrupt types supported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrqKind {
    New,
    Kill,
    IoIn,
    IoOut,
    Timeout,
    Stat,
}

impl fmt::Display for IrqKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            IrqKind::New => "#NEW",
            IrqKind::Kill => "#KILL",
            IrqKind::IoIn => "#IO_IN",
            IrqKind::IoOut => "#IO_OUT",
            IrqKind::Timeout => "#TIMEOUT",
            IrqKind::Stat => "#STAT",
        };
        f.write_str(tag)
    }
}

/// An interrupt request and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Irq {
    New { program: Program, priority: u8 },
    Kill,
    IoIn(Instruction),
    IoOut(&'static str),
    Timeout,
    Stat,
}

impl Irq {
    pub fn kind(&self) -> IrqKind {
        match self {
            Irq::New { .. } => IrqKind::New,
            Irq::Kill => IrqKind::Kill,
            Irq::IoIn(_) => IrqKind::IoIn,
            Irq::IoOut(_) => IrqKind::IoOut,
            Irq::Timeout => IrqKind::Timeout,
            Irq::Stat => IrqKind::Stat,
        }
    }
}

impl fmt::Display for Irq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Irq::New { program, priority } => {
                write!(f, "{} irq with parameters = {}, priority {}", self.kind(), program.name(), priority)
            }
            Irq::IoIn(operation) => write!(f, "{} irq with parameters = {}", self.kind(), operation),
            Irq::IoOut(device) => write!(f, "{} irq with parameters = {}", self.kind(), device),
            _ => write!(f, "{} irq", self.kind()),
        }
    }
}

/// An interrupt service routine working on context `C`.
pub type Handler<C> = fn(&mut C, &mut Hardware, &Irq) -> Result<()>;

/// The interrupt vector table: one handler per interrupt type.
pub struct InterruptVector<C> {
    handlers: HashMap<IrqKind, Handler<C>>,
}

impl<C> InterruptVector<C> {
    pub fn new() -> InterruptVector<C> {
        InterruptVector {
            handlers: HashMap::new(),
        }
    }

    /// Binds `handler` to `kind`, replacing (and returning) any previous one.
    pub fn register(&mut self, kind: IrqKind, handler: Handler<C>) -> Option<Handler<C>> {
        let previous = self.handlers.insert(kind, handler);
        if previous.is_some() {
            warn!("Handler for {} irq replaced", kind);
        }
        previous
    }

    pub fn is_registered(&self, kind: IrqKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn lookup(&self, kind: IrqKind) -> Result<Handler<C>> {
        self.handlers
            .get(&kind)
            .copied()
            .ok_or(Fault::UnregisteredInterrupt(kind))
    }

    /// Runs the handler bound to the request to completion. Requests with no
    /// handler are logged and dropped.
    pub fn handle(&self, context: &mut C, hardware: &mut Hardware, irq: &Irq) -> Result<()> {
        info!("Handling {}", irq);

        match self.lookup(irq.kind()) {
            Ok(handler) => handler(context, hardware, irq),
            Err(fault) => {
                info!("{}", fault);
                Ok(())
            }
        }
    }
}

impl<C> Default for InterruptVector<C> {
    fn default() -> InterruptVector<C> {
        InterruptVector::new()
    }
}
