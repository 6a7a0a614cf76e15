//! tmux backend - the default multiplexer on Unix systems.

use std::collections::BTreeMap;
use std::path::Path;

use muxwright_core::{PaneSize, Result};

use crate::contract::Multiplexer;
use crate::{invoke, parse};

const PROGRAM: &str = "tmux";

/// Multiplexer backend driving an installed `tmux` binary.
///
/// Stateless: every operation is one `tmux` invocation and tmux itself is
/// the source of truth for session state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tmux;

// Argument-list construction is split out as pure functions so the exact
// command lines are unit-testable without a tmux binary present.

fn new_session_args(
    name: &str,
    start_dir: Option<&Path>,
    env: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut args = vec![
        "new-session".to_string(),
        "-d".to_string(),
        "-s".to_string(),
        name.to_string(),
    ];
    if let Some(dir) = start_dir {
        args.push("-c".to_string());
        args.push(dir.display().to_string());
    }
    // BTreeMap iteration keeps the -e flags in a stable order.
    for (key, value) in env {
        args.push("-e".to_string());
        args.push(format!("{key}={value}"));
    }
    args
}

fn kill_session_args(name: &str) -> Vec<String> {
    vec!["kill-session".to_string(), "-t".to_string(), name.to_string()]
}

fn has_session_args(name: &str) -> Vec<String> {
    vec!["has-session".to_string(), "-t".to_string(), name.to_string()]
}

fn list_sessions_args() -> Vec<String> {
    vec![
        "list-sessions".to_string(),
        "-F".to_string(),
        "#{session_name}".to_string(),
    ]
}

fn send_keys_args(target: &str, keys: &[&str]) -> Vec<String> {
    let mut args = vec!["send-keys".to_string(), "-t".to_string(), target.to_string()];
    args.extend(keys.iter().map(|key| key.to_string()));
    args
}

fn send_literal_args(target: &str, text: &str) -> Vec<String> {
    vec![
        "send-keys".to_string(),
        "-t".to_string(),
        target.to_string(),
        "-l".to_string(),
        text.to_string(),
    ]
}

fn resize_pane_args(target: &str, width: u16, height: u16) -> Vec<String> {
    vec![
        "resize-pane".to_string(),
        "-t".to_string(),
        target.to_string(),
        "-x".to_string(),
        width.to_string(),
        "-y".to_string(),
        height.to_string(),
    ]
}

fn set_manual_sizing_args(session: &str) -> Vec<String> {
    vec![
        "set-option".to_string(),
        "-t".to_string(),
        session.to_string(),
        "window-size".to_string(),
        "manual".to_string(),
    ]
}

fn pane_size_args(target: &str) -> Vec<String> {
    vec![
        "display-message".to_string(),
        "-t".to_string(),
        target.to_string(),
        "-p".to_string(),
        "#{pane_width} #{pane_height}".to_string(),
    ]
}

fn capture_pane_args(target: &str, scrollback: i32) -> Vec<String> {
    let mut args = vec![
        "capture-pane".to_string(),
        "-t".to_string(),
        target.to_string(),
        "-p".to_string(), // print to stdout
        "-e".to_string(), // include escape sequences
    ];
    if scrollback > 0 {
        args.push("-S".to_string());
        args.push(format!("-{scrollback}"));
    }
    args
}

fn load_buffer_args() -> Vec<String> {
    // "-" reads the staged text from our stdin pipe.
    vec!["load-buffer".to_string(), "-".to_string()]
}

fn paste_buffer_args(target: &str) -> Vec<String> {
    vec![
        "paste-buffer".to_string(),
        "-t".to_string(),
        target.to_string(),
        "-d".to_string(), // delete the buffer after pasting
        "-p".to_string(), // no newline translation (bracketed paste)
    ]
}

impl Multiplexer for Tmux {
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
