//! Command execution functions.
//!
//! Each command runs the pipeline strictly in order and reports failures with
//! recovery suggestions. Inside GitHub Actions failures are also emitted as
//! `::error::` workflow commands so they show up as annotations.

mod build;
mod helpers;
mod publish;

use crate::EnvConfig;
use crate::cli::action::error_annotation;
use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{ReleaseError, Result};

use build::execute_build;
use publish::execute_publish;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    let env_config = EnvConfig::from_env();
    let config = RuntimeConfig::from_args(&args, &env_config);

    // Validate arguments before building anything
    if let Err(validation_error) = args.validate() {
        report_failure(&config, &env_config, "Invalid arguments", &validation_error);
        return Ok(1);
    }

    let result = match &args.command {
        Command::Build(build) => execute_build(build, &config, &env_config).await,
        Command::Publish(publish) => execute_publish(publish, &config, &env_config).await,
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            let context = format!("Command '{}' failed", args.command.name());
            report_failure(&config, &env_config, &context, &e);
            Ok(1)
        }
    }
}

fn report_failure(config: &RuntimeConfig, env_config: &EnvConfig, context: &str, e: &ReleaseError) {
    config.error_println(&format!("{}: {}", context, e));

    if env_config.is_github_actions() {
        println!("{}", error_annotation(&e.to_string()));
    }

    let suggestions = e.recovery_suggestions();
    if !suggestions.is_empty() {
        config.println("\n💡 Recovery suggestions:");
        for suggestion in suggestions {
            config.println(&format!("  • {}", suggestion));
        }
    }
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Build(_) => "build",
            Command::Publish(_) => "publish",
        }
    }
}
