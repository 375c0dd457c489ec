//! Platform-specific artifact post-processing before upload.
//!
//! The updater already ships a `{name}.app.tar.gz`; uploading the raw `.app`
//! bundle under that naming scheme would overwrite the signed archive, so
//! macOS bundles are archived under a distinct name instead.

use super::platform::{Platform, archive_arch_label};
use crate::error::{BuildError, Result};
use crate::project::Info;
use flate2::{Compression, write::GzEncoder};
use std::path::{Path, PathBuf};

/// Transform applied to each artifact, selected once per run from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Artifacts are uploaded as produced
    Passthrough,
    /// `.app` bundles are archived to `.app.tar.gz`
    MacosAppArchive {
        /// Application name
        app_name: String,
        /// Application version
        version: String,
        /// Arch label derived from the target triple
        arch: String,
    },
}

impl PostProcessor {
    /// Select the strategy for `platform`
    pub fn for_platform(platform: Platform, info: &Info, target: Option<&str>) -> Self {
        match platform {
            Platform::MacOs => Self::MacosAppArchive {
                app_name: info.name.clone(),
                version: info.version.clone(),
                arch: archive_arch_label(target),
            },
            Platform::Windows | Platform::Linux => Self::Passthrough,
        }
    }

    /// Path an artifact will be uploaded from, without touching the disk
    pub fn output_path(&self, artifact: &Path) -> PathBuf {
        match self {
            Self::MacosAppArchive {
                app_name,
                version,
                arch,
            } if is_app_bundle(artifact) => {
                let name = macos_archive_name(app_name, version, arch);
                match artifact.parent() {
                    Some(parent) => parent.join(name),
                    None => PathBuf::from(name),
                }
            }
            _ => artifact.to_path_buf(),
        }
    }

    /// Map artifacts to their uploadable form, one output per input, same order.
    pub async fn apply(&self, artifacts: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        let mut processed = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let output = self.output_path(&artifact);
            if output != artifact {
                log::info!(
                    "Archiving {} to {}",
                    artifact.display(),
                    output.display()
                );
                archive_bundle(&artifact, &output).await?;
            }
            processed.push(output);
        }
        Ok(processed)
    }
}

/// `{app_name}_{version}_{arch}_macos.app.tar.gz`
pub fn macos_archive_name(app_name: &str, version: &str, arch: &str) -> String {
    format!("{app_name}_{version}_{arch}_macos.app.tar.gz")
}

fn is_app_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "app")
}

/// Create `dest` as a gzipped tarball whose single top-level entry is the
/// bundle directory itself. Symlinks inside the bundle are stored as links.
pub async fn archive_bundle(bundle: &Path, dest: &Path) -> Result<()> {
    let bundle = bundle.to_path_buf();
    let dest = dest.to_path_buf();
    let error_path = bundle.clone();

    let archived = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let entry_name = bundle.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "bundle has no file name")
        })?;

        let file = std::fs::File::create(&dest)?;
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = tar::Builder::new(enc);
        tar.mode(tar::HeaderMode::Deterministic);
        tar.follow_symlinks(false);
        tar.append_dir_all(entry_name, &bundle)?;

        let enc = tar.into_inner()?;
        enc.finish()?;
        Ok(())
    })
    .await
    .map_err(|e| BuildError::ArchiveFailed {
        path: error_path.clone(),
        reason: format!("archive task failed: {}", e),
    })?;

    archived.map_err(|e| BuildError::ArchiveFailed {
        path: error_path,
        reason: e.to_string(),
    })?;

    Ok(())
}
