//! psmux backend - the default multiplexer on Windows.
//!
//! psmux is a PowerShell-native multiplexer that mirrors tmux's
//! subcommand vocabulary but not its behavior in every corner. Quirks
//! handled here and in the shared plumbing:
//!
//! - replies are CRLF-terminated (the parsers tolerate trailing `\r`)
//! - some diagnostics arrive on stdout with an empty stderr, so failure
//!   detail is taken from whichever stream has text
//! - the binary resolves as `psmux.exe` via `PATHEXT`
//! - `resize-pane` clamps to the host console buffer; a clamped size is a
//!   backend quirk observable through `pane_size`, not a contract failure

use std::collections::BTreeMap;
use std::path::Path;

use muxwright_core::{PaneSize, Result};

use crate::contract::Multiplexer;
use crate::{invoke, parse};

const PROGRAM: &str = "psmux";

/// Multiplexer backend driving an installed `psmux` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psmux;

// Argument lists are built by pure functions, mirroring the tmux backend,
// so the exact command lines are unit-testable without a psmux binary.

fn strings(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn new_session_args(
    name: &str,
    start_dir: Option<&Path>,
    env: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut args = strings(&["new-session", "-d", "-s", name]);
    if let Some(dir) = start_dir {
        // Windows paths pass through verbatim; psmux resolves them itself.
        args.push("-c".to_string());
        args.push(dir.display().to_string());
    }
    for (key, value) in env {
        args.push("-e".to_string());
        args.push(format!("{key}={value}"));
    }
    args
}

fn kill_session_args(name: &str) -> Vec<String> {
    strings(&["kill-session", "-t", name])
}

fn has_session_args(name: &str) -> Vec<String> {
    strings(&["has-session", "-t", name])
}

fn list_sessions_args() -> Vec<String> {
    strings(&["list-sessions", "-F", "#{session_name}"])
}

fn send_keys_args(target: &str, keys: &[&str]) -> Vec<String> {
    let mut args = strings(&["send-keys", "-t", target]);
    args.extend(keys.iter().map(|key| key.to_string()));
    args
}

fn send_literal_args(target: &str, text: &str) -> Vec<String> {
    strings(&["send-keys", "-t", target, "-l", text])
}

fn resize_pane_args(target: &str, width: u16, height: u16) -> Vec<String> {
    strings(&[
        "resize-pane",
        "-t",
        target,
        "-x",
        &width.to_string(),
        "-y",
        &height.to_string(),
    ])
}

fn set_manual_sizing_args(session: &str) -> Vec<String> {
    strings(&["set-option", "-t", session, "window-size", "manual"])
}

fn pane_size_args(target: &str) -> Vec<String> {
    strings(&[
        "display-message",
        "-t",
        target,
        "-p",
        "#{pane_width} #{pane_height}",
    ])
}

fn capture_pane_args(target: &str, scrollback: i32) -> Vec<String> {
    let mut args = strings(&["capture-pane", "-t", target, "-p", "-e"]);
    if scrollback > 0 {
        args.push("-S".to_string());
        args.push(format!("-{scrollback}"));
    }
    args
}

fn load_buffer_args() -> Vec<String> {
    strings(&["load-buffer", "-"])
}

fn paste_buffer_args(target: &str) -> Vec<String> {
    strings(&["paste-buffer", "-t", target, "-d", "-p"])
}

impl Multiplexer for Psmux {
    fn name(&self) -> &'static str {
        PROGRAM
    }

    fn is_installed(&self) -> bool {
        invoke::lookup_path(PROGRAM).is_some()
    }

    fn new_session(
        &self,
        name: &str,
        start_dir: Option<&Path>,
        env: &BTreeMap<String, String>,
    ) -> Result<()> {
        invoke::run(PROGRAM, &new_session_args(name, start_dir, env))
    }

    fn kill_session(&self, name: &str) -> Result<()> {
        invoke::run(PROGRAM, &kill_session_args(name))
    }

    fn has_session(&self, name: &str) -> bool {
        invoke::run(PROGRAM, &has_session_args(name)).is_ok()
    }

    fn list_sessions(&self, prefix: &str) -> Result<Vec<String>> {
        let reply = invoke::run_output(PROGRAM, &list_sessions_args())?;
        Ok(parse::session_lines(&reply, prefix))
    }

    fn send_keys(&self, target: &str, keys: &[&str]) -> Result<()> {
        invoke::run(PROGRAM, &send_keys_args(target, keys))
    }

    fn send_literal(&self, target: &str, text: &str) -> Result<()> {
        invoke::run(PROGRAM, &send_literal_args(target, text))
    }

    fn resize_pane(&self, target: &str, width: u16, height: u16) -> Result<()> {
        invoke::run(PROGRAM, &resize_pane_args(target, width, height))
    }

    fn set_manual_sizing(&self, session: &str) -> Result<()> {
        invoke::run(PROGRAM, &set_manual_sizing_args(session))
    }

    fn pane_size(&self, target: &str) -> Option<PaneSize> {
        let reply = invoke::run_output(PROGRAM, &pane_size_args(target)).ok()?;
        parse::pane_size_reply(&reply)
    }

    fn capture_pane(&self, target: &str, scrollback: i32) -> Result<String> {
        invoke::run_output(PROGRAM, &capture_pane_args(target, scrollback))
    }

    fn load_buffer(&self, text: &str) -> Result<()> {
        invoke::run_with_stdin(PROGRAM, &load_buffer_args(), text)
    }

    fn paste_buffer(&self, target: &str) -> Result<()> {
        invoke::run(PROGRAM, &paste_buffer_args(target))
    }
}
