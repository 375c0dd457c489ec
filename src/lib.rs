//! # Kodegen Bundler Tauri
//!
//! Build a Tauri desktop application and publish its bundles to a GitHub release.
//!
//! ## Features
//!
//! - **Project Discovery**: Locates `tauri.conf.json`, falling back to `package.json`
//!   and `Cargo.toml` for the app name and version
//! - **Project Initialization**: Runs `tauri init` for frontend-only projects
//! - **Artifact Discovery**: Finds bundles by the Tauri naming convention per platform
//! - **macOS Archives**: Packs `.app` bundles into uploadable `.tar.gz` archives
//! - **GitHub Releases**: Creates or reuses a release and uploads every artifact
//! - **GitHub Actions**: Reads `INPUT_*` variables and writes step outputs
//!
//! ## Usage
//!
//! ```bash
//! kodegen_bundler_tauri build --project-path ./app --target aarch64-apple-darwin
//! kodegen_bundler_tauri publish --tag-name 'v__VERSION__' --release-name 'App v__VERSION__'
//! kodegen_bundler_tauri publish --release-id 123456
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;
pub mod github;
pub mod project;
pub mod publish;

pub use bundler::{BuildOptions, Platform, PostProcessor, TauriBuilder, collect_artifacts};
pub use cli::Args;
pub use error::{CliError, ReleaseError, Result};
pub use github::{GitHubReleaseManager, ReleaseApi, ReleaseData, ReleaseSettings};
pub use project::Info;
pub use publish::{PublishOutcome, publish_artifacts};

use std::collections::HashMap;

/// Snapshot of the process environment taken once at startup.
///
/// Pipeline code reads variables through this instead of `std::env`, so
/// tests can inject values without touching global state.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`; empty values count as unset
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }

    /// Running inside a GitHub Actions job
    pub fn is_github_actions(&self) -> bool {
        self.get("GITHUB_ACTIONS").as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_unset() {
        let env = EnvConfig::from_pairs([("GITHUB_TOKEN", ""), ("GH_TOKEN", "abc")]);
        assert_eq!(env.get("GITHUB_TOKEN"), None);
        assert_eq!(env.get("GH_TOKEN").as_deref(), Some("abc"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_github_actions_detection() {
        assert!(EnvConfig::from_pairs([("GITHUB_ACTIONS", "true")]).is_github_actions());
        assert!(!EnvConfig::default().is_github_actions());
    }
}
