//! Publish orchestrator: build, stage, check, commit.
//!
//! The run is strictly linear. The only branch is after the staged-file check,
//! where an empty index ends the run successfully without a commit. Any command
//! failure stops the run at the step where it happened; nothing is retried or
//! rolled back.

use crate::config::PublisherConfig;
use crate::error::{CommandError, PublishError, Result};
use crate::git::GitClient;
use crate::process::{CommandLine, CommandRunner};
use serde::Serialize;
use std::fmt;

/// Steps of a publish run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStep {
    /// Run the documentation build command
    BuildDocs,
    /// Force-add the documentation directory
    StageDocs,
    /// List staged file names
    CheckStaged,
    /// Create the documentation commit
    Commit,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStep::BuildDocs => "build docs",
            PublishStep::StageDocs => "stage docs",
            PublishStep::CheckStaged => "check staged",
            PublishStep::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Nothing was staged, so no commit was made
    NothingToCommit,
    /// A commit was created
    Committed {
        /// Abbreviated hash of the new commit, if it could be read back
        commit: Option<String>,
        /// Files that were staged when the commit was made
        files: Vec<String>,
    },
}

impl PublishOutcome {
    /// Whether a commit was created
    pub fn is_committed(&self) -> bool {
        matches!(self, PublishOutcome::Committed { .. })
    }

    /// Format outcome for display
    pub fn format_result(&self) -> String {
        match self {
            PublishOutcome::NothingToCommit => "No changes to commit".to_string(),
            PublishOutcome::Committed { commit, files } => {
                let noun = if files.len() == 1 { "file" } else { "files" };
                let hash = commit.as_deref().unwrap_or("(hash unavailable)");
                format!("Committed {} ({} {})", hash, files.len(), noun)
            }
        }
    }
}

/// Regenerates documentation and commits it when it changed
#[derive(Debug)]
pub struct DocsPublisher<R> {
    runner: R,
    config: PublisherConfig,
}

impl<R: CommandRunner> DocsPublisher<R> {
    /// Create a publisher that executes commands through `runner`
    pub fn new(runner: R, config: PublisherConfig) -> Self {
        Self { runner, config }
    }

    /// Runner used for external commands
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Execute one publish run
    pub async fn publish(&self) -> Result<PublishOutcome> {
        let git = GitClient::new(&self.runner);

        log::info!("{}: `{}`", PublishStep::BuildDocs, self.config.build_command);
        let build = CommandLine::shell(&self.config.build_command)
            .map_err(|source| step_failed(PublishStep::BuildDocs, source))?;
        self.runner
            .run(&build)
            .await
            .map_err(|source| step_failed(PublishStep::BuildDocs, source))?;

        log::info!("{}: {}", PublishStep::StageDocs, self.config.docs_dir.display());
        git.force_add(&self.config.docs_dir)
            .await
            .map_err(|source| step_failed(PublishStep::StageDocs, source))?;

        log::info!("{}", PublishStep::CheckStaged);
        let files = git
            .staged_files()
            .await
            .map_err(|source| step_failed(PublishStep::CheckStaged, source))?;

        if files.is_empty() {
            log::info!("index is empty, nothing to commit");
            return Ok(PublishOutcome::NothingToCommit);
        }

        log::info!("{}: {} staged file(s)", PublishStep::Commit, files.len());
        git.commit(&self.config.commit_message)
            .await
            .map_err(|source| step_failed(PublishStep::Commit, source))?;
        // The commit exists at this point; a failed lookup only loses the hash.
        let commit = match git.head_commit().await {
            Ok(hash) if !hash.is_empty() => Some(hash),
            Ok(_) => None,
            Err(e) => {
                log::warn!("commit created but its hash could not be read: {}", e);
                None
            }
        };

        Ok(PublishOutcome::Committed { commit, files })
    }
}

fn step_failed(step: PublishStep, source: CommandError) -> PublishError {
    log::debug!("{} failed: {}", step, source);
    PublishError::StepFailed { step, source }
}
