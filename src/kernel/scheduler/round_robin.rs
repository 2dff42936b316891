use super::{FifoScheduler, ReadyEntry, Scheduler};

pub const ROUND_ROBIN_QUANTUM: u32 = 3;

/// FIFO order with time slices. Preemption only happens through the timer's
/// timeout interrupt, never on arrival.
pub struct RoundRobinScheduler {
    queue: FifoScheduler,
    quantum: u32,
}

impl RoundRobinScheduler {
    pub fn new(quantum: u32) -> RoundRobinScheduler {
        RoundRobinScheduler {
            queue: FifoScheduler::new(),
            quantum,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn add(&mut self, entry: ReadyEntry) {
        self.queue.add(entry);
    }

    fn next_in_queue(&mut self) -> Option<ReadyEntry> {
        self.queue.next_in_queue()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn ready(&self) -> Vec<ReadyEntry> {
        self.queue.ready()
    }

    fn quantum(&self) -> Option<u32> {
        Some(self.quantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::ProcessControlBlock;

    #[test]
    fn test_round_robin_is_fifo_with_quantum() {
        let mut scheduler = RoundRobinScheduler::new(ROUND_ROBIN_QUANTUM);
        for pid in [4, 2, 9] {
            scheduler.add(ReadyEntry {
                pid,
                priority: 1,
                enqueue_tick: 0,
            });
        }

        assert_eq!(scheduler.quantum(), Some(3));
        assert_eq!(scheduler.next_in_queue().map(|e| e.pid), Some(4));
        assert_eq!(scheduler.ready().iter().map(|e| e.pid).collect::<Vec<_>>(), vec![2, 9]);
    }

    #[test]
    fn test_round_robin_never_expropriates_on_arrival() {
        let scheduler = RoundRobinScheduler::new(ROUND_ROBIN_QUANTUM);
        let running = ProcessControlBlock::new(1, "low.exe", 0, 5);
        let incoming = ProcessControlBlock::new(2, "high.exe", 0, 1);

        assert!(!scheduler.must_expropriate(&running, &incoming));
    }
}
