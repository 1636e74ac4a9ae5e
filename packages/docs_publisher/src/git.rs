//! Git operations using CLI commands through a [`CommandRunner`].

use crate::error::CommandError;
use crate::process::{CommandLine, CommandRunner};
use std::path::Path;

/// Thin client over the git commands the publisher needs
#[derive(Debug)]
pub struct GitClient<'a, R: ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> GitClient<'a, R> {
    /// Create a client that executes git through `runner`
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    fn git<I, S>(args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::new("git").args(args)
    }

    /// Stage `path` even if it is listed in an ignore file
    pub async fn force_add(&self, path: &Path) -> Result<(), CommandError> {
        let path = path.to_string_lossy().into_owned();
        self.runner
            .run(&Self::git(["add".to_string(), "--force".to_string(), "--".to_string(), path]))
            .await
    }

    /// Names of files currently staged for commit
    pub async fn staged_files(&self) -> Result<Vec<String>, CommandError> {
        let output = self
            .runner
            .read(&Self::git(["diff", "--cached", "--name-only"]))
            .await?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Commit whatever is staged with `message`
    pub async fn commit(&self, message: &str) -> Result<(), CommandError> {
        self.runner.run(&Self::git(["commit", "-m", message])).await
    }

    /// Abbreviated hash of HEAD
    pub async fn head_commit(&self) -> Result<String, CommandError> {
        self.runner
            .read(&Self::git(["rev-parse", "--short", "HEAD"]))
            .await
    }
}
