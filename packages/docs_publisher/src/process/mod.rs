//! External process execution.
//!
//! Commands either inherit the terminal's standard streams or have their
//! standard output captured. Both modes wait for the child to exit and treat
//! any unsuccessful exit as an error.

mod command;
mod runner;

pub use command::CommandLine;
pub use runner::{CommandRunner, SystemRunner};
