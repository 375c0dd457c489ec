//! Shared helpers for build and publish commands.

use crate::EnvConfig;
use crate::bundler::{Platform, TauriBuilder, collect_artifacts};
use crate::cli::{BuildArgs, RuntimeConfig};
use crate::error::Result;
use std::path::PathBuf;

/// Resolve the project and run the release (and optionally debug) build
pub(super) async fn build_artifacts(
    args: &BuildArgs,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
    platform: Platform,
) -> Result<(TauriBuilder, Vec<PathBuf>)> {
    let root = args.project_path();
    let options = args.build_options()?;

    config.section("Building");
    config.verbose_println(&format!("Project: {}", root.display()));
    if let Some(config_path) = &options.config_path {
        config.verbose_println(&format!("Config: {}", config_path.display()));
    }

    let builder = TauriBuilder::prepare(&root, options, env_config, platform).await?;
    let info = builder.info();
    config.println(&format!("📦 {} v{}", info.name, info.version));

    let artifacts = collect_artifacts(&builder, args.include_debug).await?;
    report_artifacts(config, "Found artifacts:", &artifacts);

    Ok((builder, artifacts))
}

/// List artifact paths under a heading
pub(super) fn report_artifacts(config: &RuntimeConfig, heading: &str, artifacts: &[PathBuf]) {
    config.println(heading);
    for artifact in artifacts {
        config.indent(&artifact.display().to_string());
    }
}
