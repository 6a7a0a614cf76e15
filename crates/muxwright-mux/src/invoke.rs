//! One-shot external-process invocation.
//!
//! The only I/O primitive in this crate: spawn the multiplexer binary,
//! wait for it to exit, capture its output. No retries, no timeouts, no
//! pooling - each call owns its child process and releases the handle and
//! pipes before returning, regardless of outcome.

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use muxwright_core::{Error, Result};
use tracing::debug;

/// Run the program, discarding stdout.
pub(crate) fn run(program: &'static str, args: &[String]) -> Result<()> {
    run_output(program, args).map(|_| ())
}

/// Run the program and return its captured stdout.
pub(crate) fn run_output(program: &'static str, args: &[String]) -> Result<String> {
    debug!(program, ?args, "invoking multiplexer");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn { program, source })?;

    check(program, args, &output)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run the program with `input` piped to its stdin, discarding stdout.
pub(crate) fn run_with_stdin(program: &'static str, args: &[String], input: &str) -> Result<()> {
    debug!(program, ?args, bytes = input.len(), "invoking multiplexer with stdin");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn { program, source })?;

    // Take the pipe so it closes (EOF) before we wait on the child.
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    check(program, args, &output)?;
    Ok(())
}

/// Map a non-zero exit status to `Error::CommandFailed`, preserving the
/// program's own diagnostic text. psmux writes some diagnostics to stdout
/// rather than stderr, so both streams feed the detail.
fn check(program: &'static str, args: &[String], output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    };

    Err(Error::CommandFailed {
        program,
        command: args.first().cloned().unwrap_or_default(),
        detail,
    })
}

/// Resolve a program on the executable search path without spawning
/// anything.
///
/// Scans `PATH` directly so availability checks have no side effects. On
/// Windows the `PATHEXT` extensions are tried when the name has none.
pub(crate) fn lookup_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;

    for dir in env::split_paths(&path) {
        if dir.as_os_str().is_empty() {
            continue;
        }

        let candidate = dir.join(program);
        if is_executable(&candidate) {
            return Some(candidate);
        }

        #[cfg(windows)]
        {
            if !program.contains('.') {
                for ext in pathext_extensions() {
                    let candidate = dir.join(format!("{program}{ext}"));
                    if is_executable(&candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
    }

    None
}

#[cfg(windows)]
fn pathext_extensions() -> Vec<String> {
    env::var("PATHEXT")
        .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
        .collect()
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}
