//! Terminal-capability probes for presentation logic.
//!
//! Boolean queries only; nothing here touches the multiplexer. On Unix
//! every modern terminal we target supports custom fonts and 24-bit
//! color. On Windows the answers hinge on whether we are inside Windows
//! Terminal (which sets `WT_SESSION`) or the legacy conhost.

/// True if running inside Windows Terminal.
#[cfg(windows)]
pub fn is_windows_terminal() -> bool {
    std::env::var_os("WT_SESSION").is_some_and(|v| !v.is_empty())
}

/// Always false on non-Windows platforms.
#[cfg(not(windows))]
pub fn is_windows_terminal() -> bool {
    false
}

/// True if running in the legacy Windows console host.
#[cfg(windows)]
pub fn is_conhost() -> bool {
    !is_windows_terminal()
}

/// Always false on non-Windows platforms.
#[cfg(not(windows))]
pub fn is_conhost() -> bool {
    false
}

/// True if the terminal likely renders Nerd Fonts.
#[cfg(windows)]
pub fn supports_nerd_fonts() -> bool {
    // Windows Terminal supports custom fonts; conhost's font support is
    // too limited to rely on.
    is_windows_terminal()
}

/// True if the terminal likely renders Nerd Fonts.
#[cfg(not(windows))]
pub fn supports_nerd_fonts() -> bool {
    true
}

/// True if the terminal supports 24-bit (true) color.
#[cfg(windows)]
pub fn supports_24bit_color() -> bool {
    is_windows_terminal()
}

/// True if the terminal supports 24-bit (true) color.
#[cfg(not(windows))]
pub fn supports_24bit_color() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_unix_capabilities_are_constant() {
        assert!(!is_windows_terminal());
        assert!(!is_conhost());
        assert!(supports_nerd_fonts());
        assert!(supports_24bit_color());
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_host_is_one_of_two() {
        // Exactly one of Windows Terminal / conhost.
        assert_ne!(is_windows_terminal(), is_conhost());
    }

    #[cfg(windows)]
    #[test]
    fn test_capabilities_follow_windows_terminal() {
        assert_eq!(supports_nerd_fonts(), is_windows_terminal());
        assert_eq!(supports_24bit_color(), is_windows_terminal());
    }
}
