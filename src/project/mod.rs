//! Project discovery: locate the Tauri directory and derive application metadata.

pub mod config;
mod init;
mod manifest;

pub use config::{TAURI_CONFIG_FILE, build_overrides, merge_json, read_config, write_config};
pub use init::init_project;
pub use manifest::{ManifestInfo, package_json_info, read_cargo_manifest, read_package_json};

use crate::error::{ProjectError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never searched for tauri.conf.json
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", ".git"];

/// Default WiX installer language
pub const DEFAULT_WIX_LANGUAGE: &str = "en-US";

/// WiX language setting from `tauri.bundle.windows.wix.language`.
///
/// Tauri accepts a single language, a list, or a map keyed by language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WixLanguage {
    /// `"en-US"`
    Single(String),
    /// `["en-US", "fr-FR"]`
    List(Vec<String>),
    /// `{ "en-US": {...}, "fr-FR": {...} }`, keys sorted
    Map(Vec<String>),
}

impl Default for WixLanguage {
    fn default() -> Self {
        Self::Single(DEFAULT_WIX_LANGUAGE.to_string())
    }
}

impl WixLanguage {
    /// Parse from the config value, falling back to the default
    pub fn from_config(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(lang)) => Self::Single(lang.clone()),
            Some(Value::Array(langs)) => Self::List(
                langs
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            ),
            Some(Value::Object(langs)) => Self::Map(langs.keys().cloned().collect()),
            _ => Self::default(),
        }
    }

    /// Languages an MSI is produced for, in order
    pub fn languages(&self) -> Vec<String> {
        match self {
            Self::Single(lang) => vec![lang.clone()],
            Self::List(langs) | Self::Map(langs) => langs.clone(),
        }
    }
}

/// Application metadata, computed once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// Directory containing tauri.conf.json, if the project has one
    pub tauri_path: Option<PathBuf>,
    /// Application (product) name
    pub name: String,
    /// Application version
    pub version: String,
    /// WiX installer languages
    pub wix_language: WixLanguage,
}

/// Find the directory below `root` containing tauri.conf.json.
///
/// The shallowest match wins, so a nested example app never shadows the
/// project's own `src-tauri`. Ties at equal depth go to the smallest path.
pub fn find_tauri_dir(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == TAURI_CONFIG_FILE)
        .min_by_key(|entry| (entry.depth(), entry.path().to_path_buf()))
        .and_then(|entry| entry.path().parent().map(Path::to_path_buf))
}

/// Derive [`Info`] for the project at `root`.
///
/// With a Tauri directory: `package.productName`/`package.version` from
/// tauri.conf.json, falling back to package.json and then the Tauri crate's
/// Cargo.toml. Without one:
/// package.json (`displayName` or `name`), defaulting to `app` / `0.1.0`.
pub fn get_info(root: &Path) -> Result<Info> {
    if !root.exists() {
        return Err(ProjectError::RootNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }

    let Some(tauri_dir) = find_tauri_dir(root) else {
        let package = read_package_json(root)?
            .map(|json| package_json_info(&json))
            .unwrap_or_default();

        return Ok(Info {
            tauri_path: None,
            name: package.name.unwrap_or_else(|| "app".to_string()),
            version: package.version.unwrap_or_else(|| "0.1.0".to_string()),
            wix_language: WixLanguage::default(),
        });
    };

    let tauri_config = read_config(&config::config_path(&tauri_dir))?;
    let package = tauri_config.get("package");

    let mut name = package
        .and_then(|p| p.get("productName"))
        .and_then(Value::as_str)
        .map(String::from);
    let mut version = package
        .and_then(|p| p.get("version"))
        .and_then(Value::as_str)
        .map(|v| resolve_version(&tauri_dir, v))
        .transpose()?
        .flatten();

    if name.is_none() || version.is_none() {
        let package = read_package_json(root)?
            .map(|json| package_json_info(&json))
            .unwrap_or_default();
        name = name.or(package.name);
        version = version.or(package.version);
    }

    if name.is_none() || version.is_none() {
        let cargo = read_cargo_manifest(&tauri_dir)?;
        name = name.or(cargo.name);
        version = version.or(cargo.version);
    }

    let wix_language =
        WixLanguage::from_config(tauri_config.pointer("/tauri/bundle/windows/wix/language"));

    let name = name.ok_or_else(|| ProjectError::MissingName {
        root: root.to_path_buf(),
    })?;
    let version = version.ok_or_else(|| ProjectError::MissingVersion {
        root: root.to_path_buf(),
    })?;

    log::debug!("Resolved {} {} from {}", name, version, tauri_dir.display());

    Ok(Info {
        tauri_path: Some(tauri_dir),
        name,
        version,
        wix_language,
    })
}

/// `package.version` may point at a JSON file (e.g. `../package.json`)
/// whose `version` field is used instead.
fn resolve_version(tauri_dir: &Path, version: &str) -> Result<Option<String>> {
    if !version.ends_with(".json") {
        return Ok(Some(version.to_string()));
    }

    let path = tauri_dir.join(version);
    if !path.is_file() {
        log::warn!("Version file {} does not exist", path.display());
        return Ok(None);
    }

    Ok(read_config(&path)?
        .get("version")
        .and_then(Value::as_str)
        .map(String::from))
}
