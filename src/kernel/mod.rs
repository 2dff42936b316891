mod diagnostics;
mod dispatcher;
mod handlers;
mod io_device_controller;
mod loader;
mod pcb_table;
mod process_control_block;
pub mod scheduler;

pub use diagnostics::{Diagnostics, TickRecord};
pub use dispatcher::Dispatcher;
pub use io_device_controller::IoDeviceController;
pub use loader::Loader;
pub use pcb_table::PcbTable;
pub use process_control_block::{Pid, ProcessControlBlock, ProcessState};
pub use scheduler::{ReadyEntry, Scheduler, SchedulingAlgorithm};

use log::info;

use crate::error::{Fault, Result};
use crate::hardware::{Hardware, InterruptVector};

/// The operating system kernel. The only writer of process state: every
/// change happens inside one of its interrupt handlers.
pub struct Kernel {
    pcb_table: PcbTable,
    dispatcher: Dispatcher,
    loader: Loader,
    io_device_controller: IoDeviceController,
    scheduler: Box<dyn Scheduler>,
    diagnostics: Diagnostics,
}

impl Kernel {
    /// Registers the interrupt handlers and configures the hardware for the
    /// chosen scheduling algorithm.
    pub fn new(
        hardware: &mut Hardware,
        interrupts: &mut InterruptVector<Kernel>,
        algorithm: SchedulingAlgorithm,
    ) -> Kernel {
        handlers::install(interrupts);
        hardware.cpu.set_enable_stats(true);

        let scheduler = algorithm.build();
        if let Some(quantum) = scheduler.quantum() {
            hardware.timer.set_quantum(quantum);
        }
        info!("kernel - {} scheduling", scheduler.name());

        Kernel {
            pcb_table: PcbTable::new(),
            dispatcher: Dispatcher,
            loader: Loader::new(),
            io_device_controller: IoDeviceController::new(),
            scheduler,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn pcb_table(&self) -> &PcbTable {
        &self.pcb_table
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    pub fn io_device_controller(&self) -> &IoDeviceController {
        &self.io_device_controller
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn all_terminated(&self) -> bool {
        self.pcb_table.all_terminated()
    }

    fn running_pid(&self, irq: &str) -> Result<Pid> {
        self.pcb_table
            .running_pid()
            .ok_or_else(|| Fault::invariant(format!("{} with no running process", irq)))
    }

    fn must_expropriate(&self, running: Pid, incoming: Pid) -> Result<bool> {
        let running = self.pcb_table.get(running)?;
        let incoming = self.pcb_table.get(incoming)?;
        Ok(self.scheduler.must_expropriate(running, incoming))
    }

    /// Puts the process in the ready structure, stamping the current tick.
    fn make_ready(&mut self, pid: Pid, hardware: &Hardware) -> Result<()> {
        let pcb = self.pcb_table.get_mut(pid)?;
        if pcb.state() != ProcessState::Ready {
            pcb.set_state(ProcessState::Ready)?;
        }
        pcb.enqueue_tick = hardware.clock.current_tick();
        self.scheduler.add(ReadyEntry::from(&*pcb));
        Ok(())
    }

    /// Gives the CPU to the process. The CPU must be free.
    fn promote(&mut self, pid: Pid, hardware: &mut Hardware) -> Result<()> {
        let pcb = self.pcb_table.get_mut(pid)?;
        pcb.set_state(ProcessState::Running)?;
        self.dispatcher.load(pcb, hardware);
        self.pcb_table.set_running(Some(pid));
        Ok(())
    }

    /// Promotes the next ready process, if there is one.
    fn dispatch_next(&mut self, hardware: &mut Hardware) -> Result<()> {
        match self.scheduler.next_in_queue() {
            Some(entry) => self.promote(entry.pid, hardware),
            None => Ok(()),
        }
    }

    /// Takes the CPU away from `running`, sends it back to the ready
    /// structure and gives the CPU to `incoming`.
    fn expropriate(&mut self, running: Pid, incoming: Pid, hardware: &mut Hardware) -> Result<()> {
        let pcb = self.pcb_table.get_mut(running)?;
        self.dispatcher.save(pcb, hardware);
        self.make_ready(running, hardware)?;
        self.promote(incoming, hardware)
    }
}
