//! Comprehensive error types for kodegen_bundler_tauri operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.
//! Nothing in the pipeline recovers locally: every variant aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kodegen_bundler_tauri operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all kodegen_bundler_tauri operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument / action input errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Project discovery and configuration errors
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    /// Build tool and artifact errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// GitHub release API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },
}

/// Project discovery errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Project root does not exist
    #[error("Project path {path} does not exist")]
    RootNotFound {
        /// Path that was expected to be the project root
        path: PathBuf,
    },

    /// No tauri.conf.json below the project root (after init)
    #[error("Failed to resolve Tauri path below {root}")]
    TauriDirNotFound {
        /// Project root that was searched
        root: PathBuf,
    },

    /// Application name could not be derived
    #[error("Could not determine application name in {root}")]
    MissingName {
        /// Project root that was inspected
        root: PathBuf,
    },

    /// Application version could not be derived
    #[error("Could not determine application version in {root}")]
    MissingVersion {
        /// Project root that was inspected
        root: PathBuf,
    },

    /// Config file is not a JSON object
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidConfig {
        /// Path of the offending file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Build tool and artifact errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// No build tool could be resolved
    #[error("Tauri CLI not found: {reason}")]
    ToolNotFound {
        /// Reason for the error
        reason: String,
    },

    /// The build tool could not be started
    #[error("Failed to run {command}: {source}")]
    CommandSpawn {
        /// Command line that was attempted
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited unsuccessfully
    #[error("Command {command} failed with {status}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit status description
        status: String,
    },

    /// Both profiles produced nothing
    #[error("No artifacts were found.")]
    NoArtifacts,

    /// Archiving a macOS bundle failed
    #[error("Failed to archive {path}: {reason}")]
    ArchiveFailed {
        /// Bundle that was being archived
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// GitHub release API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token in the environment
    #[error("GitHub token not provided. Set GITHUB_TOKEN or GH_TOKEN")]
    MissingToken,

    /// Owner/repo could not be determined
    #[error("Could not determine GitHub repository: {reason}")]
    RepositoryNotFound {
        /// Reason for the error
        reason: String,
    },

    /// Release creation returned a non-success status
    #[error("Failed to create release '{tag}': {status} {message}")]
    CreateReleaseFailed {
        /// Tag that was being created
        tag: String,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Release lookup returned a non-success status
    #[error("Failed to get release {release_id}: {status} {message}")]
    GetReleaseFailed {
        /// Release id that was requested
        release_id: u64,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Asset upload failed
    #[error("Failed to upload asset {asset}: {reason}")]
    UploadFailed {
        /// File name of the asset
        asset: String,
        /// Reason for the error
        reason: String,
    },

    /// Upload URL template could not be turned into a URL
    #[error("Invalid upload URL '{url}': {source}")]
    InvalidUploadUrl {
        /// Raw upload URL returned by GitHub
        url: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Cli(CliError::ConflictingArguments { .. }) => vec![
                "Pass both --tag-name and --release-name to create a release".to_string(),
                "Omit both and pass --release-id to upload to an existing release".to_string(),
            ],
            ReleaseError::Project(ProjectError::TauriDirNotFound { .. }) => vec![
                "Point --project-path at the directory containing your frontend and src-tauri"
                    .to_string(),
            ],
            ReleaseError::Build(BuildError::ToolNotFound { .. }) => vec![
                "Install the Tauri CLI: cargo install tauri-cli".to_string(),
                "Or pass --tauri-script, e.g. \"npm run tauri\"".to_string(),
            ],
            ReleaseError::Build(BuildError::NoArtifacts) => vec![
                "Check that bundling is enabled in tauri.conf.json".to_string(),
                "Verify --target matches the target the bundles were built for".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::MissingToken) => vec![
                "Export GITHUB_TOKEN (in workflows: env: GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }})"
                    .to_string(),
            ],
            ReleaseError::GitHub(GitHubError::RepositoryNotFound { .. }) => vec![
                "Set GITHUB_REPOSITORY=owner/repo".to_string(),
                "Or configure an 'origin' remote pointing at GitHub".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
