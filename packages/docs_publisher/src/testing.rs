//! In-memory [`CommandRunner`] for unit tests.

use crate::error::CommandError;
use crate::process::{CommandLine, CommandRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every command and answers from a script keyed by the rendered command line
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    history: Mutex<Vec<String>>,
    reads: HashMap<String, Result<String, i32>>,
    failures: HashMap<String, i32>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `command` passed to `read` with the given output or exit code
    pub(crate) fn on_read(mut self, command: &str, result: Result<&str, i32>) -> Self {
        self.reads
            .insert(command.to_string(), result.map(str::to_string));
        self
    }

    /// Make `command` passed to `run` exit with `code`
    pub(crate) fn fail_run(mut self, command: &str, code: i32) -> Self {
        self.failures.insert(command.to_string(), code);
        self
    }

    pub(crate) fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn record(&self, command: &CommandLine) -> String {
        let rendered = command.to_string();
        if let Ok(mut history) = self.history.lock() {
            history.push(rendered.clone());
        }
        rendered
    }
}

#[async_trait::async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        let rendered = self.record(command);
        match self.failures.get(&rendered) {
            Some(code) => Err(CommandError::NonZeroExit {
                command: rendered,
                code: Some(*code),
            }),
            None => Ok(()),
        }
    }

    async fn read(&self, command: &CommandLine) -> Result<String, CommandError> {
        let rendered = self.record(command);
        match self.reads.get(&rendered) {
            Some(Ok(output)) => Ok(output.trim().to_string()),
            Some(Err(code)) => Err(CommandError::NonZeroExit {
                command: rendered,
                code: Some(*code),
            }),
            None => Ok(String::new()),
        }
    }
}
