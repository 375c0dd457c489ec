//! Tauri bundle building and artifact preparation.
//!
//! This module wraps the Tauri CLI to build desktop bundles and turns what it
//! produced into a list of uploadable files.
//!
//! # Supported Formats
//!
//! | Platform | Artifacts | Post-processing |
//! |----------|-----------|-----------------|
//! | Linux | .deb, AppImage (+ updater .tar.gz/.sig) | none |
//! | macOS | .dmg, .app (+ updater .tar.gz/.sig) | `.app` → `{name}_{version}_{arch}_macos.app.tar.gz` |
//! | Windows | .msi per WiX language (+ updater .zip/.sig) | none |
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_tauri::EnvConfig;
//! use kodegen_bundler_tauri::bundler::{BuildOptions, Platform, TauriBuilder, collect_artifacts};
//!
//! # async fn example() -> kodegen_bundler_tauri::Result<()> {
//! let env = EnvConfig::from_env();
//! let builder = TauriBuilder::prepare(
//!     std::path::Path::new("."),
//!     BuildOptions::default(),
//!     &env,
//!     Platform::current(),
//! )
//! .await?;
//!
//! let artifacts = collect_artifacts(&builder, false).await?;
//! for artifact in artifacts {
//!     println!("Built {}", artifact.display());
//! }
//! # Ok(())
//! # }
//! ```

mod artifacts;
mod builder;
mod platform;
mod postprocess;
mod runner;

pub use artifacts::{bundle_dir, candidate_artifacts, existing_artifacts};
pub use builder::{ArtifactSource, BuildOptions, TauriBuilder, collect_artifacts};
pub use platform::{
    Platform, archive_arch_label, bundle_arch_basis, debian_arch, dmg_arch, windows_arch,
};
pub use postprocess::{PostProcessor, archive_bundle, macos_archive_name};
pub use runner::Runner;
