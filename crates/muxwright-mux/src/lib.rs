//! # muxwright-mux
//!
//! Multiplexer backends for muxwright.
//!
//! This crate decouples the application from any specific terminal
//! multiplexer, enabling cross-platform support: tmux on Unix, psmux on
//! Windows. It provides:
//!
//! - The [`Multiplexer`] contract every backend implements
//! - The [`Tmux`] and [`Psmux`] concrete backends
//! - [`default_mux`], the memoized platform-default selector
//! - Reply-parsing helpers for the backends' textual output
//!
//! ## Design
//!
//! Every contract operation is exactly one external-program invocation:
//! the backend spawns the multiplexer binary, waits for it to exit, and
//! maps a non-zero status to [`muxwright_core::Error::CommandFailed`]. The
//! multiplexer itself is the source of truth for all session state; no
//! result is ever cached across calls. Callers needing ordering between
//! concurrent calls against the same session must serialize their own
//! calls - each invocation here is an isolated child process.

#![warn(clippy::all)]

mod contract;
mod invoke;
mod selector;

pub mod parse;
pub mod psmux;
pub mod tmux;

pub use contract::Multiplexer;
pub use psmux::Psmux;
pub use selector::default_mux;
pub use tmux::Tmux;
