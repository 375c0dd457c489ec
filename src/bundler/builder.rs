//! Build orchestration around the Tauri CLI.
//!
//! This module provides [`TauriBuilder`], which runs `tauri build` for one
//! profile at a time and reports the bundles that profile produced.
//!
//! # Overview
//!
//! The builder:
//! 1. Derives [`Info`] for the project (initializing a Tauri project if needed)
//! 2. Resolves the Tauri CLI invocation
//! 3. Assembles `build` arguments from [`BuildOptions`]
//! 4. Runs the build and discovers bundles by naming convention

use super::artifacts::{bundle_dir, candidate_artifacts, existing_artifacts};
use super::platform::Platform;
use super::runner::Runner;
use crate::EnvConfig;
use crate::error::{BuildError, Result};
use crate::project::{self, Info};
use std::path::{Path, PathBuf};

/// Build configuration for one run. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Config file merged into the build; `None` when the file does not exist
    pub config_path: Option<PathBuf>,
    /// Frontend dist directory override (`build.distDir`)
    pub dist_path: Option<String>,
    /// Icon source, relative to the project root
    pub icon_path: Option<String>,
    /// Command used to invoke the Tauri CLI (e.g. `npm run tauri`)
    pub tauri_script: Option<String>,
    /// Extra arguments appended to `tauri build`
    pub args: Vec<String>,
    /// Bundle identifier override (`tauri.bundle.identifier`)
    pub bundle_identifier: Option<String>,
    /// Rust target triple
    pub target: Option<String>,
}

impl BuildOptions {
    /// Keep `config_path` only if it points at an existing file
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = if path.is_file() {
            Some(path)
        } else {
            log::debug!("Config {} not found, using project defaults", path.display());
            None
        };
        self
    }

    fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }
}

/// Produces artifact paths for a build profile
#[allow(async_fn_in_trait)]
pub trait ArtifactSource {
    /// Build one profile and return the artifacts it produced, in order
    async fn build(&self, debug: bool) -> Result<Vec<PathBuf>>;
}

/// Runs `tauri build` for a project
#[derive(Debug, Clone)]
pub struct TauriBuilder {
    root: PathBuf,
    info: Info,
    options: BuildOptions,
    runner: Runner,
    platform: Platform,
    target_dir: PathBuf,
    config_override: Option<String>,
}

impl TauriBuilder {
    /// Create a builder for a project whose Tauri directory already exists.
    ///
    /// Config overrides are resolved here, so a broken config file fails
    /// before anything is built.
    pub fn new(
        root: &Path,
        info: Info,
        options: BuildOptions,
        runner: Runner,
        platform: Platform,
        target_dir: PathBuf,
    ) -> Result<Self> {
        let config_override = project::build_overrides(
            options.config_path.as_deref(),
            options.bundle_identifier.as_deref(),
            options.dist_path.as_deref(),
        )?
        .map(|value| serde_json::to_string(&value))
        .transpose()?;

        Ok(Self {
            root: root.to_path_buf(),
            info,
            options,
            runner,
            platform,
            target_dir,
            config_override,
        })
    }

    /// Resolve everything needed to build the project at `root`.
    ///
    /// Projects without a tauri.conf.json are initialized first; otherwise
    /// icons are regenerated when an icon path is configured.
    pub async fn prepare(
        root: &Path,
        options: BuildOptions,
        env: &EnvConfig,
        platform: Platform,
    ) -> Result<Self> {
        let mut info = project::get_info(root)?;
        let runner = Runner::resolve(root, options.tauri_script.as_deref())?;

        match &info.tauri_path {
            None => {
                info = project::init_project(root, &runner, &info, &options).await?;
            }
            Some(_) => {
                if let Some(icon) = options.icon_path.as_deref().filter(|i| !i.is_empty()) {
                    let icon = root.join(icon).display().to_string();
                    runner.exec_tauri_command(&["icon"], &[icon], root).await?;
                }
            }
        }

        let tauri_path = info
            .tauri_path
            .clone()
            .ok_or_else(|| crate::error::ProjectError::TauriDirNotFound {
                root: root.to_path_buf(),
            })?;
        let target_dir = match env.get("CARGO_TARGET_DIR") {
            Some(dir) => tauri_path.join(dir),
            None => tauri_path.join("target"),
        };
        log::debug!("Using target directory {}", target_dir.display());

        Self::new(root, info, options, runner, platform, target_dir)
    }

    /// Application metadata the builder names bundles with
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Platform bundles are produced for
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Arguments passed after `build`
    pub fn build_args(&self, debug: bool) -> Vec<String> {
        let mut args = Vec::new();
        if debug {
            args.push("--debug".to_string());
        }
        if let Some(config) = &self.config_override {
            args.push("--config".to_string());
            args.push(config.clone());
        }
        if let Some(target) = self.options.target() {
            args.push("--target".to_string());
            args.push(target.to_string());
        }
        args.extend(self.options.args.iter().cloned());
        args
    }

    /// Convention paths for `debug`, whether or not they exist yet
    pub fn candidate_artifacts(&self, debug: bool) -> Vec<PathBuf> {
        let dir = bundle_dir(&self.target_dir, self.options.target(), debug);
        candidate_artifacts(self.platform, &dir, &self.info, self.options.target())
    }
}

impl ArtifactSource for TauriBuilder {
    async fn build(&self, debug: bool) -> Result<Vec<PathBuf>> {
        self.runner
            .exec_tauri_command(&["build"], &self.build_args(debug), &self.root)
            .await?;

        let artifacts = existing_artifacts(self.candidate_artifacts(debug));
        log::info!(
            "{} build produced {} artifact(s)",
            if debug { "Debug" } else { "Release" },
            artifacts.len()
        );
        Ok(artifacts)
    }
}

/// Build the release profile, then the debug profile if requested.
///
/// Returns `release ++ debug`. An empty result is an error: publishing
/// nothing is never a success.
pub async fn collect_artifacts<S: ArtifactSource>(
    source: &S,
    include_debug: bool,
) -> Result<Vec<PathBuf>> {
    let mut artifacts = source.build(false).await?;
    if include_debug {
        artifacts.extend(source.build(true).await?);
    }

    if artifacts.is_empty() {
        return Err(BuildError::NoArtifacts.into());
    }

    Ok(artifacts)
}
