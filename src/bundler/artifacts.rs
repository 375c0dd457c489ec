//! Bundle output discovery by Tauri naming convention.
//!
//! Paths are derived from the app name, version, arch and profile, never
//! scraped from build tool output.

use super::platform::{Platform, bundle_arch_basis, debian_arch, dmg_arch, windows_arch};
use crate::project::Info;
use std::path::{Path, PathBuf};

/// `<target_dir>[/<triple>]/<release|debug>/bundle`
pub fn bundle_dir(target_dir: &Path, target: Option<&str>, debug: bool) -> PathBuf {
    let mut dir = target_dir.to_path_buf();
    if let Some(triple) = target.filter(|t| !t.is_empty()) {
        dir.push(triple);
    }
    dir.push(if debug { "debug" } else { "release" });
    dir.push("bundle");
    dir
}

/// Every path a Tauri build may produce for `platform`, in upload order.
pub fn candidate_artifacts(
    platform: Platform,
    bundle_dir: &Path,
    info: &Info,
    target: Option<&str>,
) -> Vec<PathBuf> {
    let name = &info.name;
    let version = &info.version;
    let basis = bundle_arch_basis(target);

    match platform {
        Platform::MacOs => {
            let macos = bundle_dir.join("macos");
            vec![
                bundle_dir
                    .join("dmg")
                    .join(format!("{name}_{version}_{}.dmg", dmg_arch(&basis))),
                macos.join(format!("{name}.app")),
                macos.join(format!("{name}.app.tar.gz")),
                macos.join(format!("{name}.app.tar.gz.sig")),
            ]
        }
        Platform::Windows => {
            let arch = windows_arch(&basis);
            let msi = bundle_dir.join("msi");
            info.wix_language
                .languages()
                .iter()
                .flat_map(|lang| {
                    let stem = format!("{name}_{version}_{arch}_{lang}");
                    [
                        msi.join(format!("{stem}.msi")),
                        msi.join(format!("{stem}.msi.zip")),
                        msi.join(format!("{stem}.msi.zip.sig")),
                    ]
                })
                .collect()
        }
        Platform::Linux => {
            let arch = debian_arch(&basis);
            let appimage = bundle_dir.join("appimage");
            vec![
                bundle_dir
                    .join("deb")
                    .join(format!("{name}_{version}_{arch}.deb")),
                appimage.join(format!("{name}_{version}_{arch}.AppImage")),
                appimage.join(format!("{name}_{version}_{arch}.AppImage.tar.gz")),
                appimage.join(format!("{name}_{version}_{arch}.AppImage.tar.gz.sig")),
            ]
        }
    }
}

/// Keep the candidates that exist on disk, preserving order
pub fn existing_artifacts(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    candidates
        .into_iter()
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                log::debug!("Skipping missing artifact {}", path.display());
            }
            exists
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::WixLanguage;

    fn info() -> Info {
        Info {
            tauri_path: None,
            name: "Demo".to_string(),
            version: "1.0.0".to_string(),
            wix_language: WixLanguage::List(vec!["en-US".to_string(), "fr-FR".to_string()]),
        }
    }

    #[test]
    fn test_bundle_dir() {
        let target_dir = Path::new("/p/src-tauri/target");
        assert_eq!(
            bundle_dir(target_dir, None, false),
            PathBuf::from("/p/src-tauri/target/release/bundle")
        );
        assert_eq!(
            bundle_dir(target_dir, Some("aarch64-apple-darwin"), true),
            PathBuf::from("/p/src-tauri/target/aarch64-apple-darwin/debug/bundle")
        );
    }

    #[test]
    fn test_macos_candidates() {
        let dir = Path::new("/b");
        let paths = candidate_artifacts(
            Platform::MacOs,
            dir,
            &info(),
            Some("x86_64-apple-darwin"),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/b/dmg/Demo_1.0.0_x64.dmg"),
                PathBuf::from("/b/macos/Demo.app"),
                PathBuf::from("/b/macos/Demo.app.tar.gz"),
                PathBuf::from("/b/macos/Demo.app.tar.gz.sig"),
            ]
        );
    }

    #[test]
    fn test_windows_candidates_per_language() {
        let paths = candidate_artifacts(
            Platform::Windows,
            Path::new("/b"),
            &info(),
            Some("i686-pc-windows-msvc"),
        );
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], PathBuf::from("/b/msi/Demo_1.0.0_x86_en-US.msi"));
        assert_eq!(paths[3], PathBuf::from("/b/msi/Demo_1.0.0_x86_fr-FR.msi"));
    }

    #[test]
    fn test_linux_candidates() {
        let paths = candidate_artifacts(
            Platform::Linux,
            Path::new("/b"),
            &info(),
            Some("x86_64-unknown-linux-gnu"),
        );
        assert_eq!(paths[0], PathBuf::from("/b/deb/Demo_1.0.0_amd64.deb"));
        assert_eq!(
            paths[1],
            PathBuf::from("/b/appimage/Demo_1.0.0_amd64.AppImage")
        );
    }

    #[test]
    fn test_existing_artifacts_preserves_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a.deb");
        let b = dir.path().join("b.AppImage");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        let kept = existing_artifacts(vec![
            b.clone(),
            dir.path().join("missing.sig"),
            a.clone(),
        ]);
        assert_eq!(kept, vec![b, a]);
    }
}
