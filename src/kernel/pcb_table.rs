use std::collections::BTreeMap;

use super::{Pid, ProcessControlBlock, ProcessState};
use crate::error::{Fault, Result};

/// Every PCB admitted during the run, keyed by pid. Entries are never removed.
pub struct PcbTable {
    pid_counter: Pid,
    table: BTreeMap<Pid, ProcessControlBlock>,
    running: Option<Pid>,
}

impl PcbTable {
    pub fn new() -> PcbTable {
        PcbTable {
            pid_counter: 0,
            table: BTreeMap::new(),
            running: None,
        }
    }

    pub fn new_pid(&mut self) -> Pid {
        self.pid_counter += 1;
        self.pid_counter
    }

    pub fn add(&mut self, pcb: ProcessControlBlock) {
        self.table.insert(pcb.pid(), pcb);
    }

    pub fn get(&self, pid: Pid) -> Result<&ProcessControlBlock> {
        self.table
            .get(&pid)
            .ok_or_else(|| Fault::invariant(format!("no process found for pid {}", pid)))
    }

    pub fn get_mut(&mut self, pid: Pid) -> Result<&mut ProcessControlBlock> {
        self.table
            .get_mut(&pid)
            .ok_or_else(|| Fault::invariant(format!("no process found for pid {}", pid)))
    }

    pub fn running_pid(&self) -> Option<Pid> {
        self.running
    }

    pub fn running(&self) -> Option<&ProcessControlBlock> {
        self.running.and_then(|pid| self.table.get(&pid))
    }

    pub fn set_running(&mut self, pid: Option<Pid>) {
        self.running = pid;
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.table.values()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn all_terminated(&self) -> bool {
        self.iter().all(|pcb| pcb.state() == ProcessState::Terminated)
    }

    /// Checks that at most one process is running and that the running
    /// pointer names exactly that process.
    pub fn verify(&self) -> Result<()> {
        let running: Vec<Pid> = self
            .iter()
            .filter(|pcb| pcb.state() == ProcessState::Running)
            .map(|pcb| pcb.pid())
            .collect();

        match (running.as_slice(), self.running) {
            ([], None) => Ok(()),
            ([pid], Some(pointer)) if *pid == pointer => Ok(()),
            (states, pointer) => Err(Fault::invariant(format!(
                "running pointer {:?} doesn't match running processes {:?}",
                pointer, states
            ))),
        }
    }
}

impl Default for PcbTable {
    fn default() -> PcbTable {
        PcbTable::new()
    }
}
