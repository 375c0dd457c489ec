//! Command line argument parsing and validation.
//!
//! Every option doubles as a GitHub Actions input: clap reads
//! `INPUT_<NAME>` from the environment when the flag is not given.
//! GitHub sets unset inputs to the empty string, so empty values are
//! treated as absent throughout.

use crate::EnvConfig;
use crate::bundler::BuildOptions;
use crate::error::{CliError, Result};
use crate::github::{ReleaseSettings, strip_tag_ref};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Build Tauri apps and publish them to GitHub releases
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_tauri",
    version,
    about = "Build Tauri apps and publish them to GitHub releases",
    long_about = "Build a Tauri application with the Tauri CLI and upload the resulting
bundles to a new or existing GitHub release.

Usage:
  kodegen_bundler_tauri build --project-path ./app
  kodegen_bundler_tauri publish --tag-name 'app-v__VERSION__' --release-name 'App v__VERSION__'
  kodegen_bundler_tauri publish --release-id 123456

Inside GitHub Actions every option is also read from its INPUT_* variable."
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress everything except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build bundles without publishing
    Build(BuildArgs),

    /// Build, then create or reuse a GitHub release and upload the bundles
    Publish(PublishArgs),
}

/// Options controlling the Tauri build
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Project root (directory with package.json or src-tauri)
    #[arg(long, env = "INPUT_PROJECTPATH", default_value = ".")]
    pub project_path: String,

    /// Config file merged into tauri.conf.json, relative to the project root
    #[arg(long, env = "INPUT_CONFIGPATH", default_value = "tauri.conf.json")]
    pub config_path: String,

    /// Override for build.distDir
    #[arg(long, env = "INPUT_DISTPATH")]
    pub dist_path: Option<String>,

    /// Icon source passed to `tauri icon`
    #[arg(long, env = "INPUT_ICONPATH")]
    pub icon_path: Option<String>,

    /// Also build and publish the debug profile
    #[arg(
        long,
        env = "INPUT_INCLUDEDEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub include_debug: bool,

    /// Command that runs the Tauri CLI, e.g. "npm run tauri"
    #[arg(long, env = "INPUT_TAURISCRIPT")]
    pub tauri_script: Option<String>,

    /// Extra arguments for `tauri build`, split shell-style
    #[arg(long = "args", env = "INPUT_ARGS", allow_hyphen_values = true)]
    pub build_args: Option<String>,

    /// Override for tauri.bundle.identifier
    #[arg(long, env = "INPUT_BUNDLEIDENTIFIER")]
    pub bundle_identifier: Option<String>,

    /// Rust target triple
    #[arg(long, env = "INPUT_TARGET")]
    pub target: Option<String>,

    /// Arguments after `--` are appended to `tauri build` verbatim
    #[arg(last = true, value_name = "TAURI_ARGS")]
    pub extra_args: Vec<String>,
}

/// Release options on top of the build options
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// Build options
    #[command(flatten)]
    pub build: BuildArgs,

    /// Tag to create; `__VERSION__` is replaced with the app version
    #[arg(long, env = "INPUT_TAGNAME")]
    pub tag_name: Option<String>,

    /// Release title; `__VERSION__` is replaced with the app version
    #[arg(long, env = "INPUT_RELEASENAME")]
    pub release_name: Option<String>,

    /// Release notes
    #[arg(long, env = "INPUT_RELEASEBODY")]
    pub release_body: Option<String>,

    /// Create the release as a draft
    #[arg(
        long,
        env = "INPUT_RELEASEDRAFT",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub release_draft: bool,

    /// Mark the release as a prerelease
    #[arg(
        long,
        env = "INPUT_PRERELEASE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub prerelease: bool,

    /// Commit or branch the tag is created from
    #[arg(long, env = "INPUT_RELEASECOMMITISH")]
    pub release_commitish: Option<String>,

    /// Existing release to upload to (ignored when --tag-name is set)
    #[arg(long, env = "INPUT_RELEASEID")]
    pub release_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency before anything runs
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Build(build) => build.build_options().map(|_| ()),
            Command::Publish(publish) => {
                publish.build.build_options()?;
                publish.release_settings()?.validate()
            }
        }
    }
}

impl BuildArgs {
    /// Project root, `.` when empty
    pub fn project_path(&self) -> PathBuf {
        match self.project_path.trim() {
            "" => PathBuf::from("."),
            path => PathBuf::from(path),
        }
    }

    /// Split `--args` shell-style and append trailing arguments
    pub fn tauri_args(&self) -> Result<Vec<String>> {
        let mut args = match non_empty(&self.build_args) {
            Some(raw) => shlex::split(&raw).ok_or_else(|| CliError::InvalidArguments {
                reason: format!("could not split args '{}'", raw),
            })?,
            None => Vec::new(),
        };
        args.extend(self.extra_args.iter().cloned());
        Ok(args)
    }

    /// Resolve into [`BuildOptions`]; the config path is resolved against the project root
    pub fn build_options(&self) -> Result<BuildOptions> {
        let config_path = match self.config_path.trim() {
            "" => "tauri.conf.json",
            path => path,
        };

        let options = BuildOptions {
            config_path: None,
            dist_path: non_empty(&self.dist_path),
            icon_path: non_empty(&self.icon_path),
            tauri_script: non_empty(&self.tauri_script),
            args: self.tauri_args()?,
            bundle_identifier: non_empty(&self.bundle_identifier),
            target: non_empty(&self.target),
        };

        Ok(options.with_config_path(self.project_path().join(config_path)))
    }
}

impl PublishArgs {
    /// Release inputs with `refs/tags/` stripped and the release id parsed
    pub fn release_settings(&self) -> Result<ReleaseSettings> {
        let release_id = match non_empty(&self.release_id) {
            Some(raw) => raw.parse::<u64>().map_err(|_| CliError::InvalidArguments {
                reason: format!("releaseId must be a number, got '{}'", raw),
            })?,
            None => 0,
        };

        Ok(ReleaseSettings {
            tag_name: non_empty(&self.tag_name).map(|t| strip_tag_ref(&t)),
            release_name: non_empty(&self.release_name).map(|n| strip_tag_ref(&n)),
            body: non_empty(&self.release_body).unwrap_or_default(),
            draft: self.release_draft,
            prerelease: self.prerelease,
            commitish: non_empty(&self.release_commitish),
            release_id,
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool, env: &EnvConfig) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet, env),
        }
    }

    /// Runtime configuration for parsed arguments in the given environment
    pub fn from_args(args: &Args, env: &EnvConfig) -> Self {
        Self::new(args.verbose, args.quiet, env)
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print message only in verbose mode
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_args_split_shell_style() {
        let args = parse(&[
            "kodegen_bundler_tauri",
            "build",
            "--args",
            "--features 'a b' --verbose",
            "--",
            "--bundles",
            "deb",
        ]);
        let Command::Build(build) = args.command else {
            panic!("expected build command");
        };
        assert_eq!(
            build.tauri_args().unwrap(),
            vec!["--features", "a b", "--verbose", "--bundles", "deb"]
        );
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        let build = BuildArgs {
            build_args: Some("--features 'a".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build.tauri_args(),
            Err(ReleaseError::Cli(CliError::InvalidArguments { .. }))
        ));
    }

    #[test]
    fn test_empty_inputs_are_absent() {
        let build = BuildArgs {
            dist_path: Some(String::new()),
            target: Some("  ".to_string()),
            bundle_identifier: Some("com.demo.app".to_string()),
            ..Default::default()
        };
        let options = build.build_options().unwrap();
        assert_eq!(options.dist_path, None);
        assert_eq!(options.target, None);
        assert_eq!(options.bundle_identifier.as_deref(), Some("com.demo.app"));
    }

    #[test]
    fn test_config_path_resolved_against_project() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("release.conf.json"), "{}").unwrap();

        let build = BuildArgs {
            project_path: dir.path().display().to_string(),
            config_path: "release.conf.json".to_string(),
            ..Default::default()
        };
        assert_eq!(
            build.build_options().unwrap().config_path,
            Some(dir.path().join("release.conf.json"))
        );

        let missing = BuildArgs {
            project_path: dir.path().display().to_string(),
            config_path: "tauri.conf.json".to_string(),
            ..Default::default()
        };
        assert_eq!(missing.build_options().unwrap().config_path, None);
    }

    #[test]
    fn test_release_settings_strip_refs_and_parse_id() {
        let publish = PublishArgs {
            tag_name: Some("refs/tags/v1.0.0".to_string()),
            release_name: Some("v1.0.0".to_string()),
            release_id: Some("".to_string()),
            release_draft: true,
            ..Default::default()
        };
        let settings = publish.release_settings().unwrap();
        assert_eq!(settings.tag_name.as_deref(), Some("v1.0.0"));
        assert_eq!(settings.release_id, 0);
        assert!(settings.draft);
    }

    #[test]
    fn test_invalid_release_id() {
        let publish = PublishArgs {
            release_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(publish.release_settings().is_err());
    }

    #[test]
    fn test_validate_rejects_tag_without_name() {
        let args = parse(&["kodegen_bundler_tauri", "publish", "--tag-name", "v1"]);
        assert!(matches!(
            args.validate(),
            Err(ReleaseError::Cli(CliError::ConflictingArguments { .. }))
        ));
    }

    #[test]
    fn test_bool_flags() {
        let args = parse(&[
            "kodegen_bundler_tauri",
            "publish",
            "--include-debug",
            "--prerelease",
        ]);
        let Command::Publish(publish) = args.command else {
            panic!("expected publish command");
        };
        assert!(publish.build.include_debug);
        assert!(publish.prerelease);
        assert!(!publish.release_draft);
    }
}
