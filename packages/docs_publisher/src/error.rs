//! Error types for docs_publisher operations.
//!
//! Every failure of an external command is fatal. The top-level error knows
//! which exit code to hand back to the caller and which recovery hints to show.

use crate::publisher::PublishStep;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for docs_publisher operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Exit code used when an external program could not be started at all
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Exit code used for invalid arguments or configuration
pub const EXIT_USAGE: i32 = 2;

/// Main error type for all docs_publisher operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// A publish step failed because its external command failed
    #[error("{step} failed: {source}")]
    StepFailed {
        /// Step that was running when the command failed
        step: PublishStep,
        /// Underlying command failure
        #[source]
        source: CommandError,
    },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of an external command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command line was rejected before anything was spawned
    #[error("Invalid command line '{command}': {reason}")]
    Invalid {
        /// The rejected command line
        command: String,
        /// Why it was rejected
        reason: String,
    },

    /// The program could not be started
    #[error("Failed to execute '{command}': {source}")]
    SpawnFailed {
        /// The command that could not be started
        command: String,
        /// The underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("'{command}' exited with {}", describe_exit(.code))]
    NonZeroExit {
        /// The command that failed
        command: String,
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// The program did not finish within the configured timeout
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut {
        /// The command that timed out
        command: String,
        /// Configured timeout
        timeout: Duration,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        /// Path to the config file
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this tool
    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        /// Path to the config file
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A config value is out of range
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why the value is invalid
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for invalid arguments
        reason: String,
    },

    /// A required external program is not on PATH
    #[error("Required program '{program}' was not found on PATH")]
    MissingProgram {
        /// Name of the missing program
        program: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl CommandError {
    /// Exit code this failure should propagate to the caller
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Invalid { .. } => EXIT_USAGE,
            CommandError::SpawnFailed { .. } => EXIT_SPAWN_FAILED,
            CommandError::NonZeroExit { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            CommandError::TimedOut { .. } => 1,
        }
    }
}

impl PublishError {
    /// Exit code for the process when this error ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::StepFailed { source, .. } => source.exit_code(),
            PublishError::Config(_) | PublishError::Cli(_) => EXIT_USAGE,
            PublishError::Io(_) | PublishError::Json(_) => 1,
        }
    }

    /// Step that failed, if the error happened inside the publish sequence
    pub fn failed_step(&self) -> Option<PublishStep> {
        match self {
            PublishError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::StepFailed {
                step: PublishStep::BuildDocs,
                ..
            } => vec![
                "Run the documentation build by hand to see the full failure".to_string(),
                "Override the build command with --build-command".to_string(),
            ],
            PublishError::StepFailed {
                step: PublishStep::StageDocs,
                ..
            } => vec![
                "Check that the documentation directory exists after the build".to_string(),
                "Inspect the repository state: git status".to_string(),
            ],
            PublishError::StepFailed {
                step: PublishStep::Commit,
                ..
            } => vec![
                "Documentation changes are still staged: git diff --cached --stat".to_string(),
                "Check git identity settings: git config user.name / user.email".to_string(),
            ],
            PublishError::Cli(CliError::MissingProgram { program }) => vec![
                format!("Install '{}' or add it to PATH", program),
            ],
            PublishError::Config(ConfigError::ParseFailed { path, .. }) => vec![
                format!("Fix the TOML syntax in {}", path.display()),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
