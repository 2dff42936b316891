use std::time::Duration;

use crate::error::ConfigError;
use crate::hardware::{DEFAULT_LIMIT, MEMORY_SIZE, PRINTER_TIME};
use crate::kernel::SchedulingAlgorithm;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Everything needed to build a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub memory_size: usize,
    pub mmu_limit: usize,
    pub io_device_time: u32,
    pub tick_interval: Duration,
    pub scheduling_algorithm: SchedulingAlgorithm,
}

impl Config {
    pub fn with_algorithm(scheduling_algorithm: SchedulingAlgorithm) -> Config {
        Config {
            scheduling_algorithm,
            ..Config::default()
        }
    }

    /// Reads `[ALGORITHM] [TICK_MS]` from the command line arguments.
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        if let Some(algorithm) = args.next() {
            config.scheduling_algorithm = algorithm.as_ref().parse()?;
        }

        if let Some(tick_ms) = args.next() {
            let tick_ms = tick_ms.as_ref();
            let millis = tick_ms.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                name: "tick interval",
                value: tick_ms.to_string(),
            })?;
            config.tick_interval = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            memory_size: MEMORY_SIZE,
            mmu_limit: DEFAULT_LIMIT,
            io_device_time: PRINTER_TIME,
            tick_interval: TICK_INTERVAL,
            scheduling_algorithm: SchedulingAlgorithm::Fifo,
        }
    }
}
