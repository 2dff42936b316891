/// Hardware notified on every clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscriber {
    /// The timer, which wraps the CPU cycle.
    Timer,
    IoDevice,
}

/// The internal clock. Keeps the subscriber order and the tick counter; the
/// tick itself is driven by [`crate::Machine::tick`].
pub struct Clock {
    subscribers: Vec<Subscriber>,
    current_tick: u64,
    elapsed: u64,
}

impl Clock {
    pub fn new() -> Clock {
        Clock {
            subscribers: Vec::new(),
            current_tick: 0,
            elapsed: 0,
        }
    }

    pub fn add_subscriber(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// The tick being processed, or the last one processed.
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Number of ticks completed so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub(crate) fn begin_tick(&mut self) -> u64 {
        self.current_tick = self.elapsed;
        self.current_tick
    }

    pub(crate) fn end_tick(&mut self) {
        self.elapsed += 1;
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_keeps_registration_order() {
        let mut clock = Clock::new();
        clock.add_subscriber(Subscriber::Timer);
        clock.add_subscriber(Subscriber::IoDevice);

        assert_eq!(clock.subscribers(), &[Subscriber::Timer, Subscriber::IoDevice]);
    }

    #[test]
    fn test_clock_counts_ticks() {
        let mut clock = Clock::new();

        assert_eq!(clock.begin_tick(), 0);
        clock.end_tick();
        assert_eq!(clock.begin_tick(), 1);
        assert_eq!(clock.current_tick(), 1);
        clock.end_tick();
        assert_eq!(clock.elapsed(), 2);
    }
}
