//! Platform-default backend selection.

use std::sync::OnceLock;

use crate::contract::Multiplexer;

static DEFAULT_MUX: OnceLock<Box<dyn Multiplexer>> = OnceLock::new();

/// The platform-default multiplexer backend: tmux on Unix systems
/// (Linux, macOS), psmux on Windows.
///
/// Resolved once per process and memoized; repeated calls return the same
/// instance. Platform branching is confined to this factory so callers
/// only ever see `&dyn Multiplexer`.
pub fn default_mux() -> &'static dyn Multiplexer {
    DEFAULT_MUX
        .get_or_init(|| {
            #[cfg(windows)]
            {
                Box::new(crate::psmux::Psmux)
            }

            #[cfg(not(windows))]
            {
                Box::new(crate::tmux::Tmux)
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_platform() {
        let mux = default_mux();

        #[cfg(windows)]
        assert_eq!(mux.name(), "psmux");

        #[cfg(not(windows))]
        assert_eq!(mux.name(), "tmux");
    }

    #[test]
    fn test_default_is_memoized() {
        let first = default_mux() as *const dyn Multiplexer;
        let second = default_mux() as *const dyn Multiplexer;
        assert!(std::ptr::eq(first, second));
    }
}
