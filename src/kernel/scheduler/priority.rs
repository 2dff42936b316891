use std::collections::VecDeque;

use log::debug;

use super::{ReadyEntry, Scheduler};
use crate::kernel::ProcessControlBlock;

/// Number of priority levels. Priority 1 is the highest.
pub const PRIORITY_LEVELS: usize = 5;

/// Ticks a process must wait before it is aged, and statistics interrupts
/// between two aging passes.
pub const AGING_TICKS: u64 = 4;

/// Static priorities with aging. One FIFO bucket per priority level; the
/// preemptive variant lets a strictly higher priority process (smaller number)
/// take the CPU on arrival.
pub struct PriorityScheduler {
    ready_queues: [VecDeque<ReadyEntry>; PRIORITY_LEVELS],
    ticks_to_age: u64,
    preemptive: bool,
}

impl PriorityScheduler {
    pub fn non_preemptive() -> PriorityScheduler {
        PriorityScheduler::new(false)
    }

    pub fn preemptive() -> PriorityScheduler {
        PriorityScheduler::new(true)
    }

    fn new(preemptive: bool) -> PriorityScheduler {
        PriorityScheduler {
            ready_queues: Default::default(),
            ticks_to_age: AGING_TICKS,
            preemptive,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    fn clamp(priority: u8) -> u8 {
        priority.clamp(1, PRIORITY_LEVELS as u8)
    }

    /// Moves every entry that has waited long enough one level up. Levels are
    /// visited from the highest down, so an entry climbs at most once per pass.
    fn age(&mut self, now: u64) {
        for level in 1..PRIORITY_LEVELS {
            let (upper, lower) = self.ready_queues.split_at_mut(level);
            let target = &mut upper[level - 1];
            let source = &mut lower[0];

            let mut kept = VecDeque::with_capacity(source.len());
            while let Some(mut entry) = source.pop_front() {
                if entry.enqueue_tick + AGING_TICKS <= now {
                    entry.priority -= 1;
                    debug!("scheduler - pid {} aged to priority {}", entry.pid, entry.priority);
                    target.push_back(entry);
                } else {
                    kept.push_back(entry);
                }
            }
            *source = kept;
        }
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        if self.preemptive {
            "Priority (preemptive)"
        } else {
            "Priority"
        }
    }

    fn add(&mut self, mut entry: ReadyEntry) {
        entry.priority = PriorityScheduler::clamp(entry.priority);
        self.ready_queues[entry.priority as usize - 1].push_back(entry);
    }

    fn next_in_queue(&mut self) -> Option<ReadyEntry> {
        self.ready_queues.iter_mut().find_map(|queue| queue.pop_front())
    }

    fn is_empty(&self) -> bool {
        self.ready_queues.iter().all(|queue| queue.is_empty())
    }

    fn ready(&self) -> Vec<ReadyEntry> {
        self.ready_queues.iter().flatten().copied().collect()
    }

    fn must_expropriate(&self, running: &ProcessControlBlock, incoming: &ProcessControlBlock) -> bool {
        self.preemptive && incoming.priority() < running.priority()
    }

    fn check_tick(&mut self, now: u64) {
        self.ticks_to_age = self.ticks_to_age.saturating_sub(1);
        if self.ticks_to_age == 0 {
            self.age(now);
            self.ticks_to_age = AGING_TICKS;
        }
    }
}
