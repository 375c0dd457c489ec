//! tauri.conf.json loading and override merging.

use crate::error::{ProjectError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File name of the Tauri configuration
pub const TAURI_CONFIG_FILE: &str = "tauri.conf.json";

/// Path of the configuration file inside a Tauri directory
pub fn config_path(tauri_dir: &Path) -> PathBuf {
    tauri_dir.join(TAURI_CONFIG_FILE)
}

/// Read a JSON object from disk
pub fn read_config(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(ProjectError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        }
        .into());
    }
    Ok(value)
}

/// Write a JSON document pretty-printed with two-space indentation
pub fn write_config(path: &Path, config: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value replaces the base value.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Object document holding `value` at `path`, e.g. `{"build": {"distDir": ..}}`
pub fn nested(path: &[&str], value: Value) -> Value {
    path.iter().rev().fold(value, |inner, key| {
        let mut map = Map::new();
        map.insert(key.to_string(), inner);
        Value::Object(map)
    })
}

/// Set `value` at an object path, creating intermediate objects and
/// replacing any non-object parent on the way.
pub fn set_path(config: &mut Value, path: &[&str], value: Value) {
    if path.is_empty() {
        return;
    }
    merge_json(config, nested(path, value));
}

/// Build the inline `--config` document for the build tool.
///
/// The user's config file is the base; bundle identifier and dist dir
/// overrides are layered on top. Returns `None` when nothing overrides the
/// project's own tauri.conf.json.
pub fn build_overrides(
    config_file: Option<&Path>,
    bundle_identifier: Option<&str>,
    dist_path: Option<&str>,
) -> Result<Option<Value>> {
    let mut overrides = match config_file {
        Some(path) => read_config(path)?,
        None => Value::Object(Map::new()),
    };

    if let Some(identifier) = bundle_identifier {
        merge_json(
            &mut overrides,
            nested(
                &["tauri", "bundle", "identifier"],
                Value::String(identifier.to_string()),
            ),
        );
    }

    if let Some(dist) = dist_path {
        merge_json(
            &mut overrides,
            nested(&["build", "distDir"], Value::String(dist.to_string())),
        );
    }

    match &overrides {
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(overrides)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_merge_json_nested() {
        let mut base = json!({
            "package": { "productName": "app", "version": "0.1.0" },
            "tauri": { "bundle": { "active": true } }
        });
        merge_json(
            &mut base,
            json!({
                "package": { "version": "1.0.0" },
                "tauri": { "bundle": { "identifier": "com.example.app" } }
            }),
        );

        assert_eq!(
            base,
            json!({
                "package": { "productName": "app", "version": "1.0.0" },
                "tauri": { "bundle": { "active": true, "identifier": "com.example.app" } }
            })
        );
    }

    #[test]
    fn test_merge_json_replaces_non_objects() {
        let mut base = json!({ "targets": ["deb", "msi"] });
        merge_json(&mut base, json!({ "targets": "all" }));
        assert_eq!(base, json!({ "targets": "all" }));
    }

    #[test]
    fn test_set_path_replaces_scalar_parent() {
        let mut config = json!({ "tauri": "oops" });
        set_path(&mut config, &["tauri", "bundle", "identifier"], json!("id"));
        assert_eq!(config, json!({ "tauri": { "bundle": { "identifier": "id" } } }));
    }

    #[test]
    fn test_nested_document() {
        assert_eq!(
            nested(&["build", "distDir"], json!("../dist")),
            json!({ "build": { "distDir": "../dist" } })
        );
    }

    #[test]
    fn test_set_path_keeps_siblings() {
        let mut config = json!({ "package": { "productName": "app" } });
        set_path(&mut config, &["package", "version"], json!("1.0.0"));
        assert_eq!(
            config,
            json!({ "package": { "productName": "app", "version": "1.0.0" } })
        );
    }

    #[test]
    fn test_no_overrides() {
        assert!(build_overrides(None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_overrides_layer_on_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.conf.json");
        std::fs::write(
            &path,
            r#"{ "tauri": { "bundle": { "identifier": "from.file", "active": true } } }"#,
        )
        .unwrap();

        let overrides = build_overrides(Some(&path), Some("from.flag"), Some("../dist"))
            .unwrap()
            .unwrap();

        assert_eq!(
            overrides,
            json!({
                "tauri": { "bundle": { "identifier": "from.flag", "active": true } },
                "build": { "distDir": "../dist" }
            })
        );
    }

    #[test]
    fn test_read_config_rejects_arrays() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TAURI_CONFIG_FILE);
        std::fs::write(&path, "[]").unwrap();
        assert!(read_config(&path).is_err());
    }
}
