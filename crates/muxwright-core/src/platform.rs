//! Platform detection for multiplexer backend selection.

use serde::{Deserialize, Serialize};

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux
    Linux,
    /// macOS
    MacOS,
    /// Windows
    Windows,
}

impl Platform {
    /// Detect the current platform at compile time.
    ///
    /// The multiplexer backend is chosen from this: tmux on Unix systems,
    /// psmux on Windows.
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        {
            Platform::Linux
        }

        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }

        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            compile_error!("Unsupported platform - only Linux, macOS, and Windows are supported")
        }
    }

    /// Get the platform name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOS => "macOS",
            Platform::Windows => "Windows",
        }
    }

    /// Check if this is a Unix-like platform.
    pub fn is_unix(&self) -> bool {
        matches!(self, Platform::Linux | Platform::MacOS)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detect() {
        let platform = Platform::detect();
        assert!(matches!(
            platform,
            Platform::Linux | Platform::MacOS | Platform::Windows
        ));
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(Platform::Linux.name(), "Linux");
        assert_eq!(Platform::MacOS.name(), "macOS");
        assert_eq!(Platform::Windows.name(), "Windows");
    }

    #[test]
    fn test_is_unix() {
        assert!(Platform::Linux.is_unix());
        assert!(Platform::MacOS.is_unix());
        assert!(!Platform::Windows.is_unix());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Platform::Linux), "Linux");
        assert_eq!(format!("{}", Platform::MacOS), "macOS");
        assert_eq!(format!("{}", Platform::Windows), "Windows");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Platform::MacOS).unwrap();
        assert_eq!(json, "\"macos\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::MacOS);
    }
}
