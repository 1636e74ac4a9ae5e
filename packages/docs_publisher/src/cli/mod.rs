//! Command line interface for docs_publisher.

mod args;
mod commands;

pub use args::{Args, RuntimeConfig, VerbosityLevel};
pub use commands::{execute_command, validate_args, NOTHING_TO_COMMIT_MESSAGE};
