//! Process execution via tokio::process

use crate::error::CommandError;
use crate::process::CommandLine;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio::time::timeout;

/// Runs external commands to completion, one at a time
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command with inherited stdin/stdout/stderr.
    ///
    /// Fails if the command cannot be started or exits unsuccessfully.
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError>;

    /// Run a command and return its standard output, trimmed.
    ///
    /// Standard error stays attached to the terminal. Same failure policy as [`run`](Self::run).
    async fn read(&self, command: &CommandLine) -> Result<String, CommandError>;
}

/// Runner that spawns real processes inside a fixed working directory
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// Create a runner that executes everything in `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Kill commands, and everything they started, that run longer than `limit`
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    fn spawn(&self, command: &CommandLine, stdout: Stdio) -> Result<Child, CommandError> {
        let mut cmd = command.to_command(&self.working_dir);
        cmd.stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        // Only timed runs get their own group; otherwise the build stays in the
        // terminal's foreground group and receives Ctrl-C with us.
        #[cfg(unix)]
        if self.timeout.is_some() {
            cmd.process_group(0);
        }

        spawn_command(command, &mut cmd)
    }

    /// Wait for `child` to exit, collecting its stdout if it was piped
    async fn wait(
        &self,
        command: &CommandLine,
        mut child: Child,
    ) -> Result<(ExitStatus, Vec<u8>), CommandError> {
        let mut stdout = child.stdout.take();

        let result = match self.timeout {
            None => collect(&mut child, stdout.as_mut()).await,
            Some(limit) => {
                let waited = timeout(limit, collect(&mut child, stdout.as_mut())).await;
                match waited {
                    Ok(result) => result,
                    Err(_) => {
                        log::debug!("`{}` timed out after {:?}, killing it", command, limit);
                        #[cfg(unix)]
                        kill_process_group(child.id());
                        // Reaps the child even when the group kill already took it down.
                        let _ = child.kill().await;
                        return Err(CommandError::TimedOut {
                            command: command.to_string(),
                            timeout: limit,
                        });
                    }
                }
            }
        };

        result.map_err(|source| CommandError::SpawnFailed {
            command: command.to_string(),
            source,
        })
    }
}

fn spawn_command(command: &CommandLine, cmd: &mut Command) -> Result<Child, CommandError> {
    cmd.spawn().map_err(|source| CommandError::SpawnFailed {
        command: command.to_string(),
        source,
    })
}

async fn collect(
    child: &mut Child,
    stdout: Option<&mut ChildStdout>,
) -> std::io::Result<(ExitStatus, Vec<u8>)> {
    let mut captured = Vec::new();
    if let Some(stdout) = stdout {
        stdout.read_to_end(&mut captured).await?;
    }
    let status = child.wait().await?;
    Ok((status, captured))
}

/// Send SIGKILL to the process group led by `pid`
#[cfg(unix)]
#[allow(unsafe_code)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pgid) = pid.and_then(|pid| libc::pid_t::try_from(pid).ok()) else {
        return;
    };

    // SAFETY: killpg takes plain integers and only sends a signal. The group id
    // is the child's pid because timed children are spawned with process_group(0).
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        log::debug!(
            "killpg({}) failed: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    }
}

fn check_status(command: &CommandLine, status: ExitStatus) -> Result<(), CommandError> {
    if status.success() {
        Ok(())
    } else {
        Err(CommandError::NonZeroExit {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

#[async_trait::async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        log::debug!("running `{}` in {}", command, self.working_dir.display());

        let child = self.spawn(command, Stdio::inherit())?;
        let (status, _) = self.wait(command, child).await?;
        check_status(command, status)
    }

    async fn read(&self, command: &CommandLine) -> Result<String, CommandError> {
        log::debug!("reading `{}` in {}", command, self.working_dir.display());

        let child = self.spawn(command, Stdio::piped())?;
        let (status, stdout) = self.wait(command, child).await?;
        check_status(command, status)?;

        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn runner() -> SystemRunner {
        SystemRunner::new(std::env::temp_dir())
    }

    #[tokio::test]
    async fn read_trims_captured_output() {
        let cmd = CommandLine::shell("printf '  docs/index.html\\n\\n'").unwrap();
        let out = runner().read(&cmd).await.unwrap();
        assert_eq!(out, "docs/index.html");
    }

    #[tokio::test]
    async fn run_reports_child_exit_code() {
        let cmd = CommandLine::shell("exit 7").unwrap();
        match runner().run(&cmd).await {
            Err(CommandError::NonZeroExit { code, command }) => {
                assert_eq!(code, Some(7));
                assert_eq!(command, "exit 7");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn read_fails_on_non_zero_exit() {
        let cmd = CommandLine::shell("echo partial; exit 4").unwrap();
        let err = runner().read(&cmd).await.unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_failure() {
        let cmd = CommandLine::new("docs-publisher-no-such-program");
        let err = runner().run(&cmd).await.unwrap_err();
        assert!(matches!(err, CommandError::SpawnFailed { .. }));
    }

    #[tokio::test]
    async fn commands_run_in_the_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path());
        let cmd = CommandLine::shell("touch marker").unwrap();
        runner.run(&cmd).await.unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn slow_commands_time_out() {
        let runner = runner().with_timeout(Some(Duration::from_millis(100)));
        let cmd = CommandLine::shell("sleep 5").unwrap();
        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, CommandError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn timeout_kills_processes_started_by_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path()).with_timeout(Some(Duration::from_millis(200)));
        let cmd = CommandLine::shell("(sleep 1; echo late > late_write)").unwrap();

        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, CommandError::TimedOut { .. }));

        tokio::time::sleep(Duration::from_millis(1800)).await;
        assert!(!dir.path().join("late_write").exists());
    }

    #[tokio::test]
    async fn timed_read_still_captures_output() {
        let runner = runner().with_timeout(Some(Duration::from_secs(30)));
        let cmd = CommandLine::shell("echo docs/index.html").unwrap();
        assert_eq!(runner.read(&cmd).await.unwrap(), "docs/index.html");
    }
}
