//! Command execution: load configuration, run the publisher, report the outcome.

use crate::cli::{Args, RuntimeConfig};
use crate::config::PublisherConfig;
use crate::error::{CliError, Result};
use crate::process::SystemRunner;
use crate::publisher::{DocsPublisher, PublishOutcome};
use path_absolutize::Absolutize;

/// Printed when the build left nothing to commit
pub const NOTHING_TO_COMMIT_MESSAGE: &str = "No changes to commit, skipping commit step";

/// Execute a publish run based on parsed arguments and return the exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(e) = validate_args(&args) {
        eprintln!("❌ {}", e);
        return Ok(e.exit_code());
    }

    let config = RuntimeConfig::from(&args);

    match execute_publish(&args, &config).await {
        Ok(outcome) => {
            report_outcome(&outcome, &config)?;
            Ok(0)
        }
        Err(e) => {
            config.error_println(&format!("Publishing docs failed: {}", e));

            if config.is_verbose() {
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    eprintln!("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        eprintln!("  • {}", suggestion);
                    }
                }
            }

            Ok(e.exit_code())
        }
    }
}

/// Validate arguments before anything is run
pub fn validate_args(args: &Args) -> Result<()> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason }.into())
}

/// Resolve configuration and run the publisher
async fn execute_publish(args: &Args, config: &RuntimeConfig) -> Result<PublishOutcome> {
    let repo = args.repo_path().absolutize()?.into_owned();

    let file_config = match &args.config {
        Some(path) => {
            config.verbose_println(&format!("Loading config from {}", path.display()));
            PublisherConfig::load(path)?
        }
        None => PublisherConfig::default(),
    };
    let publisher_config = args.apply_overrides(file_config);
    publisher_config.validate()?;

    which::which("git").map_err(|_| CliError::MissingProgram {
        program: "git".to_string(),
    })?;

    config.verbose_println(&format!("Repository: {}", repo.display()));
    config.verbose_println(&format!("Build command: {}", publisher_config.build_command));
    config.verbose_println(&format!(
        "Documentation directory: {}",
        publisher_config.docs_dir.display()
    ));

    let runner = SystemRunner::new(repo).with_timeout(publisher_config.timeout());
    let publisher = DocsPublisher::new(runner, publisher_config);

    publisher.publish().await
}

fn report_outcome(outcome: &PublishOutcome, config: &RuntimeConfig) -> Result<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        PublishOutcome::NothingToCommit => config.println(NOTHING_TO_COMMIT_MESSAGE),
        PublishOutcome::Committed { files, .. } => {
            config.success_println(&outcome.format_result());
            for file in files {
                config.verbose_println(file);
            }
        }
    }

    Ok(())
}
