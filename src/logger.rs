use std::env;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use owo_colors::OwoColorize;

struct ColoredLogger;

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => eprintln!("[{}] {}", "ERROR".red(), record.args()),
                Level::Warn => eprintln!("[{}] {}", "WARN".yellow(), record.args()),
                Level::Info => eprintln!("[{}] {}", "INFO".cyan(), record.args()),
                Level::Debug => eprintln!("[{}] {}", "DEBUG".blue(), record.args()),
                Level::Trace => eprintln!("[{}] {}", "TRACE".bright_black(), record.args()),
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: ColoredLogger = ColoredLogger;

/// Installs the colored logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Reads the level from the environment variable, `info` when unset or
/// unparsable.
pub fn level_from_env(var: &str) -> LevelFilter {
    env::var(var)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}
