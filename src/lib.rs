//! A process-management simulator: a virtual machine driven by a clock tick and
//! a kernel that schedules processes in response to hardware interrupts.

pub mod config;
pub mod driver;
pub mod error;
pub mod hardware;
pub mod io;
pub mod kernel;
pub mod logger;
pub mod machine;

pub use config::Config;
pub use driver::Driver;
pub use error::{ConfigError, Fault, Result};
pub use machine::Machine;
