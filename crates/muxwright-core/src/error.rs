//! Error types shared by all muxwright crates.

use thiserror::Error;

/// Main error type for muxwright operations.
///
/// "Not found" results of the two existence-style queries (`has_session`
/// and `pane_size`) are never expressed through this type; those collapse
/// into a `bool`/`Option` at the contract level so callers cannot tell
/// "absent" from "the check itself failed".
#[derive(Debug, Error)]
pub enum Error {
    /// The multiplexer binary does not resolve on the search path
    #[error("{program} is not installed (not found on PATH)")]
    BackendUnavailable {
        /// Multiplexer executable name (e.g. "tmux", "psmux")
        program: &'static str,
    },

    /// The multiplexer was invoked but exited non-zero.
    ///
    /// `detail` carries the program's own diagnostic text verbatim; the
    /// core has no better information than the program itself produced.
    #[error("{program} {command} failed: {detail}")]
    CommandFailed {
        /// Multiplexer executable name
        program: &'static str,
        /// Subcommand that failed (e.g. "new-session")
        command: String,
        /// Diagnostic text captured from the process
        detail: String,
    },

    /// The multiplexer process could not be started at all
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Multiplexer executable name
        program: &'static str,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// A textual reply did not match the strict expected format
    #[error("unexpected reply from {program}: {reply:?}")]
    MalformedReply {
        /// Multiplexer executable name
        program: &'static str,
        /// The reply that failed to parse
        reply: String,
    },

    /// The manifest lock is held by another process
    #[error("manifest lock is held by another process")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error means the manifest lock is held by
    /// another process, as opposed to any other failure.
    ///
    /// Callers use this to decide on their own retry policy; nothing in
    /// muxwright retries automatically.
    pub fn is_lock_busy(&self) -> bool {
        matches!(self, Error::LockBusy)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
