//! Mouse event types and the SGR escape-sequence encoder.
//!
//! Terminal applications that enable mouse reporting (mode 1006) receive
//! pointer events as printable SGR escape sequences rather than raw binary
//! bytes. Encoding is pure and byte-exact; delivery is layered on top of
//! literal key injection by the backend, so the encoder lives here with no
//! knowledge of any multiplexer.

use serde::{Deserialize, Serialize};

/// A single pointer event destined for a pane.
///
/// Pure data with no identity; consumed once to produce an escape sequence.
/// Button codes follow the xterm convention: 0 = left, 1 = middle,
/// 2 = right, 64 = scroll up, 65 = scroll down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseEvent {
    /// Button code
    pub button: i32,
    /// Column in character cells (1-indexed on the wire)
    pub column: i32,
    /// Row in character cells (1-indexed on the wire)
    pub row: i32,
    /// True for a button-release event
    pub release: bool,
}

impl MouseEvent {
    /// Create a button-press event.
    pub fn press(button: i32, column: i32, row: i32) -> Self {
        Self {
            button,
            column,
            row,
            release: false,
        }
    }

    /// Create a button-release event.
    pub fn release(button: i32, column: i32, row: i32) -> Self {
        Self {
            button,
            column,
            row,
            release: true,
        }
    }

    /// Encode this event as an SGR mouse escape sequence.
    ///
    /// Produces exactly `ESC [ < button ; column ; row FINAL` where `FINAL`
    /// is `M` for press and `m` for release. Coordinates are emitted as
    /// decimal ASCII with no padding. This function has no failure modes:
    /// out-of-range or negative values are encoded as given, and range
    /// validation belongs to the caller.
    pub fn sgr_sequence(&self) -> String {
        let terminator = if self.release { 'm' } else { 'M' };
        format!(
            "\x1b[<{};{};{}{}",
            self.button, self.column, self.row, terminator
        )
    }
}
