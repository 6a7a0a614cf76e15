//! # muxwright-core
//!
//! Core types for muxwright.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other muxwright crates. It provides:
//!
//! - Error types shared by every layer
//! - Platform detection for backend selection
//! - Mouse event types and the SGR escape-sequence encoder
//! - Pane geometry types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other muxwright crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod error;
pub mod geometry;
pub mod mouse;
pub mod platform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::PaneSize;
pub use mouse::MouseEvent;
pub use platform::Platform;
