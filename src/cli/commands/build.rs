//! Build command: produce bundles without publishing.

use super::helpers::build_artifacts;
use crate::EnvConfig;
use crate::bundler::Platform;
use crate::cli::action::ActionOutputs;
use crate::cli::{BuildArgs, RuntimeConfig};
use crate::error::Result;

/// Execute build command
pub(super) async fn execute_build(
    args: &BuildArgs,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
) -> Result<i32> {
    let (_, artifacts) = build_artifacts(args, config, env_config, Platform::current()).await?;

    ActionOutputs::from_env(env_config).set_artifact_paths(&artifacts)?;
    config.success_println(&format!("Built {} artifact(s)", artifacts.len()));
    Ok(0)
}
