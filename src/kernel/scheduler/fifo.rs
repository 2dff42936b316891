use std::collections::VecDeque;

use super::{ReadyEntry, Scheduler};

/// First come, first served. Never preempts.
pub struct FifoScheduler {
    ready_queue: VecDeque<ReadyEntry>,
}

impl FifoScheduler {
    pub fn new() -> FifoScheduler {
        FifoScheduler {
            ready_queue: VecDeque::new(),
        }
    }
}

impl Default for FifoScheduler {
    fn default() -> FifoScheduler {
        FifoScheduler::new()
    }
}

impl Scheduler for FifoScheduler {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn add(&mut self, entry: ReadyEntry) {
        self.ready_queue.push_back(entry);
    }

    fn next_in_queue(&mut self) -> Option<ReadyEntry> {
        self.ready_queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.ready_queue.is_empty()
    }

    fn ready(&self) -> Vec<ReadyEntry> {
        self.ready_queue.iter().copied().collect()
    }
}
