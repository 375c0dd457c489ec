//! Host platform detection and target-triple architecture labels.
//!
//! All label functions are pure so naming conventions can be tested without
//! running a build.

/// Platform the bundles are produced on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS (.app, .dmg)
    MacOs,
    /// Windows (.msi)
    Windows,
    /// Linux and other unix hosts (.deb, .AppImage)
    Linux,
}

impl Platform {
    /// Detect the platform this process runs on.
    ///
    /// Uses `std::env::consts::OS` at runtime rather than cfg attributes.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Linux,
        }
    }
}

/// First dash-delimited segment of a target triple
fn triple_arch(target: &str) -> &str {
    target.split('-').next().unwrap_or(target)
}

/// Architecture basis for bundle file names: the target triple's arch, or
/// the host arch when no target is given.
pub fn bundle_arch_basis(target: Option<&str>) -> String {
    match target.filter(|t| !t.is_empty()) {
        Some(target) => triple_arch(target).to_string(),
        None => std::env::consts::ARCH.to_string(),
    }
}

/// Arch label used in `.dmg` file names
pub fn dmg_arch(basis: &str) -> String {
    match basis {
        "x86_64" => "x64".to_string(),
        other => other.to_string(),
    }
}

/// Arch label used in `.msi` file names (`x86` or `x64`)
pub fn windows_arch(basis: &str) -> &'static str {
    if basis.starts_with('i') || basis == "x86" {
        "x86"
    } else {
        "x64"
    }
}

/// Arch label used in `.deb` and `.AppImage` file names
pub fn debian_arch(basis: &str) -> String {
    match basis {
        "x86_64" | "x64" => "amd64".to_string(),
        "i686" | "x86" | "x32" => "i386".to_string(),
        other => other.to_string(),
    }
}

/// Arch label for the renamed macOS app archive.
///
/// An absent target maps through `x86_64` regardless of the host.
pub fn archive_arch_label(target: Option<&str>) -> String {
    let basis = target
        .filter(|t| !t.is_empty())
        .map(triple_arch)
        .unwrap_or("x86_64");

    match basis {
        "x86_64" => "x64".to_string(),
        "i686" => "x86".to_string(),
        other => other.to_string(),
    }
}
