//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, plus the runtime
//! configuration that controls user-facing output.

use crate::config::PublisherConfig;
use clap::Parser;
use std::path::PathBuf;

/// Docs Publisher - regenerate documentation and commit it when it changed
#[derive(Parser, Debug)]
#[command(
    name = "docs_publisher",
    version,
    about = "Regenerate documentation and commit it when it changed",
    long_about = "Docs Publisher runs the documentation build, force-stages the generated
directory (it is normally gitignored) and commits it with a fixed message.
When the build produced no changes it exits successfully without committing."
)]
pub struct Args {
    /// Path to repository root (defaults to current directory)
    #[arg(short = 'C', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Generated documentation directory, relative to the repository root
    #[arg(long, value_name = "DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Shell command that regenerates the documentation
    #[arg(long, value_name = "CMD")]
    pub build_command: Option<String>,

    /// Commit message for documentation updates
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: Option<String>,

    /// Kill any single command running longer than this
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get repository path or default to current directory
    pub fn repo_path(&self) -> PathBuf {
        self.repo.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref repo) = self.repo {
            if !repo.exists() {
                return Err(format!("Repository path does not exist: {}", repo.display()));
            }
            if !repo.is_dir() {
                return Err(format!("Repository path is not a directory: {}", repo.display()));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        Ok(())
    }

    /// Apply flag overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: PublisherConfig) -> PublisherConfig {
        if let Some(ref docs_dir) = self.docs_dir {
            config.docs_dir = docs_dir.clone();
        }
        if let Some(ref build_command) = self.build_command {
            config.build_command = build_command.clone();
        }
        if let Some(ref message) = self.message {
            config.commit_message = message.clone();
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
        config
    }
}

/// Verbosity level for output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Minimal output, only errors
    Quiet,
    /// Standard output level
    Normal,
    /// Detailed output with debug information
    Verbose,
}

impl VerbosityLevel {
    /// Default log filter for this verbosity
    pub fn log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Output settings derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Verbosity level
    pub verbosity: VerbosityLevel,
    /// Whether the outcome is printed as JSON
    pub json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let verbosity = if args.quiet {
            VerbosityLevel::Quiet
        } else if args.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        };

        Self {
            verbosity,
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Check if output should be suppressed
    pub fn is_quiet(&self) -> bool {
        self.verbosity == VerbosityLevel::Quiet
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbosity == VerbosityLevel::Verbose
    }

    /// Print message if not in quiet mode or JSON mode
    pub fn println(&self, message: &str) {
        if !self.is_quiet() && !self.json {
            println!("{}", message);
        }
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) {
        if self.is_verbose() && !self.json {
            println!("🔍 {}", message);
        }
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    /// Print success message if not in quiet mode or JSON mode
    pub fn success_println(&self, message: &str) {
        if !self.is_quiet() && !self.json {
            println!("✅ {}", message);
        }
    }
}
