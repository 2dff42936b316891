use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info, warn};

use crate::config::Config;
use crate::error::{Fault, Result};
use crate::io::Program;
use crate::machine::Machine;

/// Drives a [`Machine`] from a clock thread.
///
/// Ticks and program admissions both go through the same lock, so interrupt
/// handling is totally ordered no matter which side raised it.
pub struct Driver {
    machine: Arc<Mutex<Machine>>,
    running: Arc<AtomicBool>,
    clock_thread: Option<JoinHandle<Result<u64>>>,
    tick_interval: Duration,
}

impl Driver {
    pub fn new(config: &Config) -> Driver {
        Driver {
            machine: Arc::new(Mutex::new(Machine::new(config))),
            running: Arc::new(AtomicBool::new(false)),
            clock_thread: None,
            tick_interval: config.tick_interval,
        }
    }

    pub fn machine(&self) -> MutexGuard<'_, Machine> {
        lock(&self.machine)
    }

    /// System call for program execution.
    pub fn run(&self, program: Program, priority: u8) -> Result<()> {
        self.machine().run(program, priority)
    }

    /// Ticks synchronously on the calling thread.
    pub fn do_ticks(&self, times: u64) -> Result<()> {
        self.machine().do_ticks(times)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Spawns the clock thread. Does nothing if it is already ticking.
    pub fn start(&mut self) {
        if self.clock_thread.is_some() {
            warn!("clock already started");
            return;
        }

        info!("---- :::: START CLOCK  ::: -----");
        self.running.store(true, Ordering::Relaxed);

        let machine = self.machine.clone();
        let running = self.running.clone();
        let tick_interval = self.tick_interval;

        self.clock_thread = Some(thread::spawn(move || {
            clock_loop(&machine, &running, tick_interval)
        }));
    }

    /// Stops the clock thread and waits for the tick in flight to finish.
    /// Returns the fault that stopped the clock, if any.
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Relaxed);

        let Some(clock_thread) = self.clock_thread.take() else {
            return Ok(());
        };

        let ticks = clock_thread
            .join()
            .map_err(|_| Fault::invariant("clock thread panicked"))??;
        info!("---- :::: STOP CLOCK after {} ticks ::: -----", ticks);
        Ok(())
    }

    /// Admits every program, ticks until all of them terminate and stops the
    /// clock.
    pub fn execute_batch(&mut self, batch: Vec<(Program, u8)>) -> Result<()> {
        for (program, priority) in batch {
            self.run(program, priority)?;
        }

        self.start();
        while self.is_running() && !self.machine().kernel().all_terminated() {
            thread::sleep(self.tick_interval.max(Duration::from_millis(1)));
        }
        self.stop()
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn lock(machine: &Mutex<Machine>) -> MutexGuard<'_, Machine> {
    machine.lock().unwrap_or_else(PoisonError::into_inner)
}

fn clock_loop(machine: &Mutex<Machine>, running: &AtomicBool, tick_interval: Duration) -> Result<u64> {
    let mut ticks = 0;
    while running.load(Ordering::Relaxed) {
        if let Err(fault) = lock(machine).tick() {
            error!("clock stopped: {}", fault);
            running.store(false, Ordering::Relaxed);
            return Err(fault);
        }
        ticks += 1;
        thread::sleep(tick_interval);
    }
    Ok(ticks)
}
