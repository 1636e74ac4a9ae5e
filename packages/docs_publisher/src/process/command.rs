//! Description of an external command to run.

use crate::error::CommandError;
use std::fmt;
use std::path::Path;
use tokio::process::Command;

/// A program plus its arguments, or a free-form line handed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    /// Original text when built from a shell line
    shell_line: Option<String>,
}

impl CommandLine {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            shell_line: None,
        }
    }

    /// Create a command that runs `line` through the platform shell
    pub fn shell(line: &str) -> Result<Self, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CommandError::Invalid {
                command: line.to_string(),
                reason: "command line is empty".to_string(),
            });
        }

        let (program, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };

        Ok(Self {
            program: program.to_string(),
            args: vec![flag.to_string(), trimmed.to_string()],
            shell_line: Some(trimmed.to_string()),
        })
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build a tokio command rooted at `working_dir`
    pub(crate) fn to_command(&self, working_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(working_dir);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = &self.shell_line {
            return f.write_str(line);
        }

        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
