use super::{PcbTable, Pid, ProcessState};

/// States of every admitted process at one statistics interrupt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickRecord {
    pub tick: u64,
    pub states: Vec<(Pid, ProcessState)>,
}

impl TickRecord {
    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.states
            .iter()
            .find(|(candidate, _)| *candidate == pid)
            .map(|(_, state)| *state)
    }
}

/// Per-tick history of process states, fed by the statistics interrupt.
#[derive(Default)]
pub struct Diagnostics {
    history: Vec<TickRecord>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn record(&mut self, tick: u64, pcb_table: &PcbTable) {
        let states = pcb_table.iter().map(|pcb| (pcb.pid(), pcb.state())).collect();
        self.history.push(TickRecord { tick, states });
    }

    pub fn history(&self) -> &[TickRecord] {
        &self.history
    }
}
