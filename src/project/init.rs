//! Initialize a Tauri project inside a plain frontend project.

use super::config::{config_path, read_config, set_path, write_config};
use super::{Info, WixLanguage, find_tauri_dir, read_package_json};
use crate::bundler::{BuildOptions, Runner};
use crate::error::{ProjectError, Result};
use serde_json::Value;
use std::path::Path;

/// Run `tauri init`, then stamp the generated tauri.conf.json with the
/// project's version, product name and bundle identifier.
///
/// Returns `info` with `tauri_path` pointing at the new Tauri directory.
pub async fn init_project(
    root: &Path,
    runner: &Runner,
    info: &Info,
    options: &BuildOptions,
) -> Result<Info> {
    log::info!("Running tauri init for {}", info.name);
    runner
        .exec_tauri_command(
            &["init"],
            &[
                "--ci".to_string(),
                "--app-name".to_string(),
                info.name.clone(),
            ],
            root,
        )
        .await?;

    let tauri_path = find_tauri_dir(root).ok_or_else(|| ProjectError::TauriDirNotFound {
        root: root.to_path_buf(),
    })?;
    let path = config_path(&tauri_path);
    let mut config = read_config(&path)?;

    let product_name = read_package_json(root)?.and_then(|json| {
        json.get("productName")
            .and_then(Value::as_str)
            .map(String::from)
    });
    stamp_config(
        &mut config,
        &info.version,
        product_name.as_deref(),
        options.bundle_identifier.as_deref(),
    );
    write_config(&path, &config)?;
    log::debug!("Wrote {}", path.display());

    if let Some(icon) = options.icon_path.as_deref().filter(|i| !i.is_empty()) {
        let icon = root.join(icon).display().to_string();
        runner.exec_tauri_command(&["icon"], &[icon], root).await?;
    }

    Ok(Info {
        tauri_path: Some(tauri_path),
        name: info.name.clone(),
        version: info.version.clone(),
        wix_language: WixLanguage::from_config(
            config.pointer("/tauri/bundle/windows/wix/language"),
        ),
    })
}

/// Apply init-time values to a freshly generated config
fn stamp_config(
    config: &mut Value,
    version: &str,
    product_name: Option<&str>,
    bundle_identifier: Option<&str>,
) {
    log::info!("Replacing tauri.conf.json config - package.version={}", version);
    set_path(config, &["package", "version"], Value::String(version.to_string()));

    if let Some(product_name) = product_name {
        log::info!(
            "Replacing tauri.conf.json config - package.productName={}",
            product_name
        );
        set_path(
            config,
            &["package", "productName"],
            Value::String(product_name.to_string()),
        );
    }

    if let Some(identifier) = bundle_identifier.filter(|i| !i.is_empty()) {
        log::info!(
            "Replacing tauri.conf.json config - tauri.bundle.identifier={}",
            identifier
        );
        set_path(
            config,
            &["tauri", "bundle", "identifier"],
            Value::String(identifier.to_string()),
        );
    }
}
