//! Name/version fallback from the Tauri crate's Cargo.toml and the frontend package.json.

use crate::error::{ProjectError, Result};
use std::path::Path;

/// Package name and version read from a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Package name
    pub name: Option<String>,
    /// Package version
    pub version: Option<String>,
}

/// Read `[package]` name/version from `<dir>/Cargo.toml`
///
/// A missing manifest yields empty info; a malformed one is an error.
pub fn read_cargo_manifest(dir: &Path) -> Result<ManifestInfo> {
    let cargo_toml_path = dir.join("Cargo.toml");
    if !cargo_toml_path.is_file() {
        return Ok(ManifestInfo::default());
    }

    let manifest = std::fs::read_to_string(&cargo_toml_path)?;
    let toml_value: toml::Value = toml::from_str(&manifest)?;

    let package = match toml_value.get("package") {
        Some(package) => package,
        None => return Ok(ManifestInfo::default()),
    };

    Ok(ManifestInfo {
        name: package
            .get("name")
            .and_then(|v| v.as_str())
            .map(String::from),
        // `version.workspace = true` is a table, not a string; treat it as unknown
        version: package
            .get("version")
            .and_then(|v| v.as_str())
            .map(String::from),
    })
}

/// Load `<root>/package.json` if it exists
pub fn read_package_json(root: &Path) -> Result<Option<serde_json::Value>> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(ProjectError::InvalidConfig {
            path,
            reason: "expected a JSON object".to_string(),
        }
        .into());
    }
    Ok(Some(value))
}

/// Name and version of the frontend package, with `displayName` preferred
/// and spaces replaced by dashes.
pub fn package_json_info(package_json: &serde_json::Value) -> ManifestInfo {
    let name = package_json
        .get("displayName")
        .or_else(|| package_json.get("name"))
        .and_then(|v| v.as_str())
        .map(|name| name.replace(' ', "-"));

    let version = package_json
        .get("version")
        .and_then(|v| v.as_str())
        .map(String::from);

    ManifestInfo { name, version }
}
