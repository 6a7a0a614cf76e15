//! Parsing helpers for the backends' textual replies.
//!
//! Replies are parsed against a strict expected format; anything else is
//! treated the same as a process failure by the callers. Lines are
//! tolerant of trailing `\r` because psmux replies are CRLF-terminated.

use muxwright_core::PaneSize;

/// Extract session names from a name-per-line listing reply.
///
/// Blank lines are skipped and only names starting with `prefix` are kept
/// (empty prefix matches all). Ordering follows the reply, i.e. the
/// multiplexer's own listing order - never sorted here.
pub fn session_lines(reply: &str, prefix: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| prefix.is_empty() || line.starts_with(prefix))
        .map(str::to_string)
        .collect()
}

/// Parse a pane-size reply: exactly two whitespace-separated integers,
/// width then height.
pub fn pane_size_reply(reply: &str) -> Option<PaneSize> {
    let mut fields = reply.split_whitespace();
    let width = fields.next()?.parse().ok()?;
    let height = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(PaneSize::new(width, height))
}
