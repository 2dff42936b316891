use super::ProcessControlBlock;
use crate::hardware::Hardware;

/// Moves process context between a PCB and the CPU/MMU registers.
pub struct Dispatcher;

impl Dispatcher {
    /// Loads the PCB's context and restarts the quantum accounting.
    pub fn load(&self, pcb: &ProcessControlBlock, hardware: &mut Hardware) {
        hardware.cpu.set_pc(Some(pcb.program_counter));
        hardware.mmu.set_base_address(pcb.base_address());
        hardware.timer.reset();
    }

    /// Saves the CPU's program counter into the PCB and leaves the CPU idle.
    pub fn save(&self, pcb: &mut ProcessControlBlock, hardware: &mut Hardware) {
        if let Some(pc) = hardware.cpu.pc() {
            pcb.program_counter = pc;
        }
        hardware.cpu.set_pc(None);
    }
}
