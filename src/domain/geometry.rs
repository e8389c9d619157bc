//! Window geometry value types.

use serde::{Deserialize, Serialize};

/// Snapshot of a window's size and position, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl WindowGeometry {
    #[must_use]
    pub const fn new(width: i32, height: i32, x: i32, y: i32) -> Self {
        Self { width, height, x, y }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Usable region of a display, excluding taskbars and docks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WorkArea {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

impl Default for WorkArea {
    fn default() -> Self {
        Self::new(0, 0, 1440, 900)
    }
}
