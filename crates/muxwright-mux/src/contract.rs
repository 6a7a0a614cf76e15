//! The backend contract every multiplexer driver implements.

use std::collections::BTreeMap;
use std::path::Path;

use muxwright_core::{Error, MouseEvent, PaneSize, Result};

/// Platform-agnostic multiplexer interface.
///
/// This trait abstracts over external terminal-multiplexer programs
/// (tmux, psmux) behind a single capability set. Callers are written
/// against `&dyn Multiplexer`, never against a concrete backend.
///
/// A *target* is an opaque address string - a session name, or a
/// `session:window.pane` triple - interpreted entirely by the external
/// program. No normalization or validation is performed here; a malformed
/// target surfaces as the program's own error, not as a contract-level
/// check.
///
/// Every operation blocks for the duration of one child process and holds
/// no state afterwards, so concurrent calls from multiple threads are
/// always safe (though unordered with respect to each other).
pub trait Multiplexer: Send + Sync {
    /// The multiplexer executable name (e.g. "tmux", "psmux").
    ///
    /// Stable and lowercase; used for diagnostics and platform dispatch.
    fn name(&self) -> &'static str;

    /// Check if the multiplexer binary resolves on the executable search
    /// path.
    ///
    /// Resolution only - the program is never started. Fast and safe to
    /// call repeatedly.
    fn is_installed(&self) -> bool;

    /// Explicit availability check: `Err(BackendUnavailable)` when the
    /// binary does not resolve.
    ///
    /// This is the only producer of that error; no other operation
    /// performs the check implicitly (an uninstalled binary surfaces as
    /// a spawn failure there).
    fn require_installed(&self) -> Result<()> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(Error::BackendUnavailable {
                program: self.name(),
            })
        }
    }

    /// Create a detached session.
    ///
    /// `start_dir = None` means "use the multiplexer's own default".
    /// `env` entries become additional process-environment bindings scoped
    /// to the new session; the `BTreeMap` guarantees a stable flag order
    /// so the constructed command line is deterministic. An empty overlay
    /// adds no flags at all.
    fn new_session(
        &self,
        name: &str,
        start_dir: Option<&Path>,
        env: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Kill a session by name.
    ///
    /// If the session does not exist the multiplexer reports failure and
    /// that failure is surfaced, not swallowed - callers may rely on it to
    /// detect "already gone".
    fn kill_session(&self, name: &str) -> Result<()>;

    /// Check whether a session exists.
    ///
    /// Any non-success exit of the presence check - including a failure to
    /// start the program at all - collapses to `false`. Callers must not
    /// infer *why* the answer was negative.
    fn has_session(&self, name: &str) -> bool;

    /// List live session names starting with `prefix` (empty matches all).
    ///
    /// Ordering follows the multiplexer's own listing order; blank reply
    /// lines are skipped. A failure to invoke the listing command itself
    /// propagates as an error, distinct from the valid empty result.
    fn list_sessions(&self, prefix: &str) -> Result<Vec<String>>;

    /// Inject named key tokens (the multiplexer's own key vocabulary,
    /// e.g. "Enter", "C-c") into the target as a single invocation,
    /// order preserved.
    fn send_keys(&self, target: &str, keys: &[&str]) -> Result<()>;

    /// Inject `text` verbatim, with no key-name interpretation.
    ///
    /// A distinct operation from [`send_keys`](Multiplexer::send_keys),
    /// not an overload: literal delivery must disable the escaping that
    /// key-name delivery requires.
    fn send_literal(&self, target: &str, text: &str) -> Result<()>;

    /// Encode and inject a pointer event using the SGR mouse protocol.
    ///
    /// The sequence is delivered as literal input; the target pane must
    /// have mouse reporting enabled for the event to have visible effect,
    /// which is not verified here - only correct encoding and delivery
    /// are guaranteed.
    fn send_mouse(&self, target: &str, event: MouseEvent) -> Result<()> {
        self.send_literal(target, &event.sgr_sequence())
    }

    /// Resize a pane to explicit cell dimensions.
    fn resize_pane(&self, target: &str, width: u16, height: u16) -> Result<()>;

    /// Disable size-follows-terminal for a session.
    ///
    /// A prerequisite for deterministic
    /// [`resize_pane`](Multiplexer::resize_pane) calls when no client is
    /// attached, e.g. when driven by automation.
    fn set_manual_sizing(&self, session: &str) -> Result<()>;

    /// Query a pane's current dimensions.
    ///
    /// `None` on any failure - target absent, program error, or a
    /// malformed reply. Sizes are never cached: the multiplexer can
    /// resize panes at any time outside our control.
    fn pane_size(&self, target: &str) -> Option<PaneSize>;

    /// Capture a pane's rendered text, preserving ANSI escape sequences.
    ///
    /// `scrollback > 0` extends the capture backward by that many lines
    /// of history; zero or negative means the visible screen only.
    fn capture_pane(&self, target: &str, scrollback: i32) -> Result<String>;

    /// Stage `text` in the multiplexer's paste buffer.
    fn load_buffer(&self, text: &str) -> Result<()>;

    /// Paste the staged buffer into the target, deleting it afterwards
    /// and suppressing newline translation.
    ///
    /// Distinct from literal injection: paste delivery may bypass
    /// per-character input processing (bracketed-paste semantics).
    fn paste_buffer(&self, target: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The contract must stay object-safe: callers hold `&dyn Multiplexer`.
    #[test]
    fn test_contract_is_object_safe() {
        fn _takes_dyn(_mux: &dyn Multiplexer) {}
    }

    struct RecordingMux(std::sync::Mutex<Vec<String>>);

    impl Multiplexer for RecordingMux {
        fn name(&self) -> &'static str {
            "recording"
        }
        fn is_installed(&self) -> bool {
            false
        }
        fn new_session(
            &self,
            _name: &str,
            _start_dir: Option<&Path>,
            _env: &BTreeMap<String, String>,
        ) -> Result<()> {
            Ok(())
        }
        fn kill_session(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        fn has_session(&self, _name: &str) -> bool {
            false
        }
        fn list_sessions(&self, _prefix: &str) -> Result<Vec<String>> {
            Ok(vec![])
        }
        fn send_keys(&self, _target: &str, _keys: &[&str]) -> Result<()> {
            Ok(())
        }
        fn send_literal(&self, _target: &str, text: &str) -> Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
        fn resize_pane(&self, _target: &str, _width: u16, _height: u16) -> Result<()> {
            Ok(())
        }
        fn set_manual_sizing(&self, _session: &str) -> Result<()> {
            Ok(())
        }
        fn pane_size(&self, _target: &str) -> Option<PaneSize> {
            None
        }
        fn capture_pane(&self, _target: &str, _scrollback: i32) -> Result<String> {
            Ok(String::new())
        }
        fn load_buffer(&self, _text: &str) -> Result<()> {
            Ok(())
        }
        fn paste_buffer(&self, _target: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_require_installed_reports_unavailable() {
        let mux = RecordingMux(std::sync::Mutex::new(Vec::new()));
        let err = mux.require_installed().unwrap_err();
        assert!(matches!(
            err,
            Error::BackendUnavailable {
                program: "recording"
            }
        ));
    }

    #[test]
    fn test_send_mouse_layers_on_send_literal() {
        let mux = RecordingMux(std::sync::Mutex::new(Vec::new()));
        mux.send_mouse("t1", MouseEvent::press(0, 12, 3)).unwrap();
        mux.send_mouse("t1", MouseEvent::release(0, 12, 3)).unwrap();

        let sent = mux.0.lock().unwrap();
        assert_eq!(sent.as_slice(), ["\x1b[<0;12;3M", "\x1b[<0;12;3m"]);
    }
}
