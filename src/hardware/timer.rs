use super::Irq;

/// Preemption clock. Counts the ticks the current process has held the CPU
/// since it was last dispatched.
pub struct Timer {
    tick_count: u32,
    active: bool,
    quantum: u32,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            tick_count: 0,
            active: false,
            quantum: 0,
        }
    }

    /// Raised before the CPU runs this tick, once the quantum is used up.
    pub fn poll(&self, cpu_busy: bool) -> Option<Irq> {
        (self.active && self.tick_count >= self.quantum && cpu_busy).then_some(Irq::Timeout)
    }

    /// Records that the process in the CPU ran one more cycle.
    pub fn record_tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn reset(&mut self) {
        self.tick_count = 0;
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Setting a quantum arms the timer.
    pub fn set_quantum(&mut self, quantum: u32) {
        self.active = true;
        self.quantum = quantum;
    }
}

impl Default for Timer {
    fn default() -> Timer {
        Timer::new()
    }
}
