//! Pane geometry types.

use serde::{Deserialize, Serialize};

/// Dimensions of a pane in character cells.
///
/// Always queried on demand and never cached: the multiplexer can resize
/// panes at any time outside our control (e.g. a user dragging a border),
/// so a stored size is stale the moment it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneSize {
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl PaneSize {
    /// Create a new pane size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for PaneSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_size_creation() {
        let size = PaneSize::new(80, 24);
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PaneSize::new(120, 40)), "120x40");
    }
}
