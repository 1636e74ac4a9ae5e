//! Docs Publisher - regenerate documentation and commit it when it changed.

use docs_publisher::cli::{execute_command, Args, RuntimeConfig};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let verbosity = RuntimeConfig::from(&args).verbosity;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .init();

    match execute_command(args).await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("❌ Fatal error: {}", e);

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                eprintln!("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    eprintln!("  • {}", suggestion);
                }
            }

            process::exit(e.exit_code());
        }
    }
}
