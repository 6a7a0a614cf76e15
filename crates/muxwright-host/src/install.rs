//! Detection of how the muxwright binary was installed.
//!
//! The probe inspects the package managers likely to have installed us -
//! Homebrew on macOS/Linux, Scoop on Windows, cargo-install anywhere -
//! and falls back to a plain binary drop. It is comparatively expensive
//! (it may shell out to `brew`), so the result is computed at most once
//! per process, even under concurrent first access, and never
//! invalidated.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the running binary was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    /// Installed via Homebrew (macOS/Linux)
    Homebrew,
    /// Installed via Scoop (Windows)
    Scoop,
    /// Installed via `cargo install`
    Cargo,
    /// Plain binary download or unknown
    Binary,
}

impl InstallMethod {
    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            InstallMethod::Homebrew => "homebrew",
            InstallMethod::Scoop => "scoop",
            InstallMethod::Cargo => "cargo",
            InstallMethod::Binary => "binary",
        }
    }
}

impl std::fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

static DETECTED: OnceLock<InstallMethod> = OnceLock::new();

/// Determine how muxwright was installed.
///
/// Checks Homebrew first, then Scoop, then cargo bin directories, and
/// falls back to [`InstallMethod::Binary`]. The result is cached for the
/// lifetime of the process.
pub fn detect_install_method() -> InstallMethod {
    *DETECTED.get_or_init(|| {
        let method = detect();
        debug!(method = %method, "detected install method");
        method
    })
}

fn detect() -> InstallMethod {
    if is_homebrew_install() {
        return InstallMethod::Homebrew;
    }
    if is_scoop_install() {
        return InstallMethod::Scoop;
    }
    if is_cargo_install() {
        return InstallMethod::Cargo;
    }
    InstallMethod::Binary
}

/// The canonicalized path of the running executable, if resolvable.
fn current_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.canonicalize().ok()
}

#[cfg(any(target_os = "macos", target_os = "linux"))]
fn is_homebrew_install() -> bool {
    use std::process::Command;

    // A missing brew binary surfaces as a spawn error, which is false.
    Command::new("brew")
        .args(["list", "--formula", "aybelatchane/tap/muxwright"])
        .output()
        .map(|output| {
            output.status.success()
                && !String::from_utf8_lossy(&output.stdout).trim().is_empty()
        })
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn is_homebrew_install() -> bool {
    false
}

#[cfg(windows)]
fn is_scoop_install() -> bool {
    let Some(exe) = current_exe() else {
        return false;
    };
    // Scoop installs to ~/scoop/apps/<app>/current/ or ~/scoop/shims/.
    let normalized = exe.to_string_lossy().to_lowercase().replace('\\', "/");
    normalized.contains("/scoop/shims/") || normalized.contains("/scoop/apps/")
}

#[cfg(not(windows))]
fn is_scoop_install() -> bool {
    false
}

fn is_cargo_install() -> bool {
    let Some(exe) = current_exe() else {
        return false;
    };
    let Some(dir) = exe.parent() else {
        return false;
    };

    // $CARGO_HOME/bin takes precedence over the default location.
    if let Some(cargo_home) = std::env::var_os("CARGO_HOME") {
        if dir == Path::new(&cargo_home).join("bin") {
            return true;
        }
    }

    if let Some(home) = dirs::home_dir() {
        if dir == home.join(".cargo").join("bin") {
            return true;
        }
    }

    // Heuristic: any path with a .cargo/bin component.
    exe.to_string_lossy().replace('\\', "/").contains("/.cargo/bin/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_is_stable_across_calls() {
        let first = detect_install_method();
        let second = detect_install_method();
        assert_eq!(first, second);
    }

    #[test]
    fn test_test_binary_is_not_package_managed() {
        // Test binaries live under target/, never in a package manager dir.
        assert!(!is_scoop_install());
        assert!(!is_cargo_install());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(InstallMethod::Homebrew.name(), "homebrew");
        assert_eq!(InstallMethod::Scoop.name(), "scoop");
        assert_eq!(InstallMethod::Cargo.name(), "cargo");
        assert_eq!(InstallMethod::Binary.name(), "binary");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&InstallMethod::Cargo).unwrap();
        assert_eq!(json, "\"cargo\"");
        let back: InstallMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InstallMethod::Cargo);
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(format!("{}", InstallMethod::Binary), "binary");
    }
}
