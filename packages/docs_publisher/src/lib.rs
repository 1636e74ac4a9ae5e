//! # Docs Publisher
//!
//! Regenerates documentation and commits it when it changed.
//!
//! A run builds the documentation, force-stages the generated directory
//! (usually gitignored), and commits it with a fixed message if anything is
//! staged. Every external command must succeed; the first failure ends the run
//! with that command's exit code.
//!
//! ## Usage
//!
//! ```bash
//! docs_publisher                                  # npm run prepare-docs, stage docs/, commit "Update docs"
//! docs_publisher -C ../site --docs-dir public     # different repository and output directory
//! docs_publisher --build-command "make html" --json
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod process;
pub mod publisher;

#[cfg(test)]
mod testing;

pub use config::PublisherConfig;
pub use error::{CommandError, PublishError, Result};
pub use git::GitClient;
pub use process::{CommandLine, CommandRunner, SystemRunner};
pub use publisher::{DocsPublisher, PublishOutcome, PublishStep};

/// Publish documentation for the repository at `repo` with default settings
pub async fn publish_docs(repo: impl Into<std::path::PathBuf>) -> Result<PublishOutcome> {
    let config = PublisherConfig::default();
    let runner = SystemRunner::new(repo).with_timeout(config.timeout());
    DocsPublisher::new(runner, config).publish().await
}
