//! # muxwright
//!
//! Command-line front end over the multiplexer contract: every subcommand
//! maps onto one operation of [`muxwright_mux::Multiplexer`], executed
//! against the platform-default backend (tmux on Unix, psmux on Windows).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use muxwright_core::{MouseEvent, Platform};
use muxwright_host::{detect_install_method, tty};
use muxwright_mux::{default_mux, Multiplexer};

#[derive(Parser)]
#[command(name = "muxwright", version, about = "Drive tmux or psmux sessions without caring which is installed")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a detached session
    New {
        /// Session name (must be unique among live sessions)
        name: String,
        /// Starting working directory (backend default when omitted)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Environment overlay entries, KEY=VALUE (repeatable)
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_entry)]
        env: Vec<(String, String)>,
    },
    /// Kill a session
    Kill {
        /// Session name
        name: String,
    },
    /// Check whether a session exists (exit 0 if it does, 1 otherwise)
    Has {
        /// Session name
        name: String,
    },
    /// List live session names
    Ls {
        /// Only names starting with this prefix
        #[arg(default_value = "")]
        prefix: String,
        /// Emit a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Send named key tokens (e.g. Enter, C-c) to a target
    SendKeys {
        /// Target: session, or session:window.pane
        target: String,
        /// Key tokens, delivered in order as one invocation
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Send text verbatim, with no key-name interpretation
    SendText {
        /// Target: session, or session:window.pane
        target: String,
        /// Literal text to inject
        text: String,
    },
    /// Inject an SGR-encoded mouse event
    SendMouse {
        /// Target: session, or session:window.pane
        target: String,
        /// Button code (0 left, 1 middle, 2 right, 64/65 scroll)
        button: i32,
        /// Column (1-indexed)
        column: i32,
        /// Row (1-indexed)
        row: i32,
        /// Send a release instead of a press
        #[arg(long)]
        release: bool,
    },
    /// Resize a pane to explicit cell dimensions
    Resize {
        /// Target: session, or session:window.pane
        target: String,
        /// Width in columns
        width: u16,
        /// Height in rows
        height: u16,
    },
    /// Disable size-follows-terminal for a session
    ManualSize {
        /// Session name
        session: String,
    },
    /// Query a pane's current dimensions
    PaneSize {
        /// Target: session, or session:window.pane
        target: String,
        /// Emit JSON instead of "WxH"
        #[arg(long)]
        json: bool,
    },
    /// Capture a pane's rendered text (ANSI-preserving)
    Capture {
        /// Target: session, or session:window.pane
        target: String,
        /// Lines of history to include (0 = visible screen only)
        #[arg(long, default_value_t = 0)]
        scrollback: i32,
    },
    /// Paste text into a target through the multiplexer's paste buffer
    Paste {
        /// Target: session, or session:window.pane
        target: String,
        /// Text to stage and paste
        text: String,
    },
    /// Report backend availability and host capabilities
    Doctor {
        /// Emit JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },
}

fn parse_env_entry(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

#[derive(Serialize)]
struct DoctorReport {
    platform: Platform,
    multiplexer: &'static str,
    installed: bool,
    install_method: muxwright_host::InstallMethod,
    windows_terminal: bool,
    nerd_fonts: bool,
    true_color: bool,
}

fn doctor_report(mux: &dyn Multiplexer) -> DoctorReport {
    DoctorReport {
        platform: Platform::detect(),
        multiplexer: mux.name(),
        installed: mux.is_installed(),
        install_method: detect_install_method(),
        windows_terminal: tty::is_windows_terminal(),
        nerd_fonts: tty::supports_nerd_fonts(),
        true_color: tty::supports_24bit_color(),
    }
}

fn run(cli: Cli, mux: &dyn Multiplexer) -> anyhow::Result<ExitCode> {
    tracing::debug!(multiplexer = mux.name(), "dispatching command");

    // `has` stays a clean boolean and `doctor` reports the missing binary
    // itself; everything else checks availability up front.
    if !matches!(cli.command, Command::Has { .. } | Command::Doctor { .. }) {
        mux.require_installed()?;
    }

    match cli.command {
        Command::New { name, dir, env } => {
            let overlay: BTreeMap<String, String> = env.into_iter().collect();
            mux.new_session(&name, dir.as_deref(), &overlay)
                .with_context(|| format!("could not create session {name:?}"))?;
        }
        Command::Kill { name } => {
            mux.kill_session(&name)
                .with_context(|| format!("could not kill session {name:?}"))?;
        }
        Command::Has { name } => {
            let present = mux.has_session(&name);
            println!("{present}");
            if !present {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Ls { prefix, json } => {
            let sessions = mux.list_sessions(&prefix)?;
            if json {
                println!("{}", serde_json::to_string(&sessions)?);
            } else {
                for name in sessions {
                    println!("{name}");
                }
            }
        }
        Command::SendKeys { target, keys } => {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            mux.send_keys(&target, &keys)?;
        }
        Command::SendText { target, text } => {
            mux.send_literal(&target, &text)?;
        }
        Command::SendMouse {
            target,
            button,
            column,
            row,
            release,
        } => {
            let event = if release {
                MouseEvent::release(button, column, row)
            } else {
                MouseEvent::press(button, column, row)
            };
            mux.send_mouse(&target, event)?;
        }
        Command::Resize {
            target,
            width,
            height,
        } => {
            mux.resize_pane(&target, width, height)?;
        }
        Command::ManualSize { session } => {
            mux.set_manual_sizing(&session)?;
        }
        Command::PaneSize { target, json } => {
            let size = mux
                .pane_size(&target)
                .ok_or_else(|| anyhow!("size unknown for target {target:?}"))?;
            if json {
                println!("{}", serde_json::to_string(&size)?);
            } else {
                println!("{size}");
            }
        }
        Command::Capture { target, scrollback } => {
            print!("{}", mux.capture_pane(&target, scrollback)?);
        }
        Command::Paste { target, text } => {
            mux.load_buffer(&text)?;
            mux.paste_buffer(&target)?;
        }
        Command::Doctor { json } => {
            let report = doctor_report(mux);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("platform:         {}", report.platform);
                println!("multiplexer:      {}", report.multiplexer);
                println!("installed:        {}", report.installed);
                println!("install method:   {}", report.install_method);
                println!("windows terminal: {}", report.windows_terminal);
                println!("nerd fonts:       {}", report.nerd_fonts);
                println!("true color:       {}", report.true_color);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli, default_mux()) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("command failed: {err:#}");
            // The multiplexer's own diagnostic text is the best we have.
            eprintln!("muxwright: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_env_entry() {
        assert_eq!(
            parse_env_entry("FOO=bar").unwrap(),
            ("FOO".to_string(), "bar".to_string())
        );
        // Values may themselves contain '='.
        assert_eq!(
            parse_env_entry("FOO=a=b").unwrap(),
            ("FOO".to_string(), "a=b".to_string())
        );
        assert!(parse_env_entry("NOVALUE").is_err());
        assert!(parse_env_entry("=bar").is_err());
    }

    #[test]
    fn test_parse_new_with_env() {
        let cli = Cli::try_parse_from([
            "muxwright", "new", "t1", "--dir", "/tmp", "--env", "FOO=bar", "--env", "BAZ=1",
        ])
        .unwrap();

        match cli.command {
            Command::New { name, dir, env } => {
                assert_eq!(name, "t1");
                assert_eq!(dir.as_deref(), Some(std::path::Path::new("/tmp")));
                assert_eq!(env.len(), 2);
            }
            _ => panic!("expected new subcommand"),
        }
    }

    #[test]
    fn test_parse_send_mouse_release() {
        let cli = Cli::try_parse_from([
            "muxwright", "send-mouse", "t1:0.0", "0", "10", "5", "--release",
        ])
        .unwrap();

        match cli.command {
            Command::SendMouse {
                button,
                column,
                row,
                release,
                ..
            } => {
                assert_eq!((button, column, row), (0, 10, 5));
                assert!(release);
            }
            _ => panic!("expected send-mouse subcommand"),
        }
    }

    #[test]
    fn test_parse_capture_defaults_to_visible_screen() {
        let cli = Cli::try_parse_from(["muxwright", "capture", "t1"]).unwrap();
        match cli.command {
            Command::Capture { scrollback, .. } => assert_eq!(scrollback, 0),
            _ => panic!("expected capture subcommand"),
        }
    }

    #[test]
    fn test_run_logs_command_dispatch() {
        use std::io::Write;
        use std::path::Path;
        use std::sync::{Arc, Mutex};

        use muxwright_core::{PaneSize, Result as MuxResult};

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Capture {
            type Writer = Capture;
            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        struct AbsentMux;

        impl Multiplexer for AbsentMux {
            fn name(&self) -> &'static str {
                "absent"
            }
            fn is_installed(&self) -> bool {
                false
            }
            fn new_session(
                &self,
                _name: &str,
                _start_dir: Option<&Path>,
                _env: &BTreeMap<String, String>,
            ) -> MuxResult<()> {
                Ok(())
            }
            fn kill_session(&self, _name: &str) -> MuxResult<()> {
                Ok(())
            }
            fn has_session(&self, _name: &str) -> bool {
                false
            }
            fn list_sessions(&self, _prefix: &str) -> MuxResult<Vec<String>> {
                Ok(vec![])
            }
            fn send_keys(&self, _target: &str, _keys: &[&str]) -> MuxResult<()> {
                Ok(())
            }
            fn send_literal(&self, _target: &str, _text: &str) -> MuxResult<()> {
                Ok(())
            }
            fn resize_pane(&self, _target: &str, _width: u16, _height: u16) -> MuxResult<()> {
                Ok(())
            }
            fn set_manual_sizing(&self, _session: &str) -> MuxResult<()> {
                Ok(())
            }
            fn pane_size(&self, _target: &str) -> Option<PaneSize> {
                None
            }
            fn capture_pane(&self, _target: &str, _scrollback: i32) -> MuxResult<String> {
                Ok(String::new())
            }
            fn load_buffer(&self, _text: &str) -> MuxResult<()> {
                Ok(())
            }
            fn paste_buffer(&self, _target: &str) -> MuxResult<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();

        let cli = Cli::try_parse_from(["muxwright", "has", "ghost"]).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            run(cli, &AbsentMux).unwrap();
        });

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("dispatching command"));
        assert!(logged.contains("multiplexer=\"absent\""));
    }

    #[test]
    fn test_doctor_report_serializes() {
        let report = doctor_report(default_mux());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"multiplexer\""));
        assert!(json.contains("\"install_method\""));
    }
}
