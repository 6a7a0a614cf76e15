//! # muxwright-host
//!
//! Host-environment utilities for muxwright.
//!
//! Collaborators around the multiplexer core, each independent of the
//! others:
//!
//! - [`envcmd`] - shell/PowerShell command text for environment variables,
//!   used for commands run *inside* a session (session creation passes
//!   bindings directly to the multiplexer instead)
//! - [`lock`] - advisory non-blocking file locking for the configuration
//!   manifest
//! - [`tty`] - terminal-capability probes for presentation logic
//! - [`install`] - memoized detection of how the binary was installed

#![warn(clippy::all)]

pub mod envcmd;
pub mod install;
pub mod lock;
pub mod tty;

pub use install::{detect_install_method, InstallMethod};
pub use lock::{LockMode, ManifestLock};
