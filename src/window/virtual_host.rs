//! In-memory window used by the headless shell and tests.

use super::host::{WindowHost, WindowLevel};
use crate::domain::{BoostFocusError, Result, WindowGeometry, WorkArea};

/// A window that only exists as numbers.
///
/// Behaves like a single-display desktop: every query answers from the stored
/// bounds, and [`close`](Self::close) makes every call fail with
/// [`BoostFocusError::WindowUnavailable`] until [`reopen`](Self::reopen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualWindow {
    bounds: WindowGeometry,
    work_area: WorkArea,
    always_on_top: bool,
    level: WindowLevel,
    available: bool,
}

impl Default for VirtualWindow {
    fn default() -> Self {
        Self::new(WindowGeometry::new(800, 600, 320, 150), WorkArea::default())
    }
}

impl VirtualWindow {
    #[must_use]
    pub const fn new(bounds: WindowGeometry, work_area: WorkArea) -> Self {
        Self {
            bounds,
            work_area,
            always_on_top: false,
            level: WindowLevel::Normal,
            available: true,
        }
    }

    #[must_use]
    pub const fn bounds(&self) -> WindowGeometry {
        self.bounds
    }

    #[must_use]
    pub const fn level(&self) -> WindowLevel {
        self.level
    }

    /// Simulates the window being destroyed.
    pub fn close(&mut self) {
        self.available = false;
    }

    pub fn reopen(&mut self) {
        self.available = true;
    }

    /// Simulates moving to another display or a dock/taskbar change.
    pub fn set_work_area(&mut self, work_area: WorkArea) {
        self.work_area = work_area;
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(BoostFocusError::WindowUnavailable)
        }
    }
}

impl WindowHost for VirtualWindow {
    fn is_available(&self) -> bool {
        self.available
    }

    fn size(&self) -> Result<(i32, i32)> {
        self.ensure_available()?;
        Ok((self.bounds.width, self.bounds.height))
    }

    fn position(&self) -> Result<(i32, i32)> {
        self.ensure_available()?;
        Ok((self.bounds.x, self.bounds.y))
    }

    fn set_size(&mut self, width: i32, height: i32) -> Result<()> {
        self.ensure_available()?;
        if width <= 0 || height <= 0 {
            return Err(BoostFocusError::WindowHost(format!(
                "invalid window size {width}x{height}"
            )));
        }
        self.bounds.width = width;
        self.bounds.height = height;
        Ok(())
    }

    fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        self.ensure_available()?;
        self.bounds.x = x;
        self.bounds.y = y;
        Ok(())
    }

    fn set_always_on_top(&mut self, on_top: bool, level: WindowLevel) -> Result<()> {
        self.ensure_available()?;
        self.always_on_top = on_top;
        self.level = if on_top { level } else { WindowLevel::Normal };
        Ok(())
    }

    fn is_always_on_top(&self) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.always_on_top)
    }

    fn center(&mut self) -> Result<()> {
        self.ensure_available()?;
        self.bounds.x = self.work_area.x + (self.work_area.width - self.bounds.width) / 2;
        self.bounds.y = self.work_area.y + (self.work_area.height - self.bounds.height) / 2;
        Ok(())
    }

    fn work_area(&self) -> Result<WorkArea> {
        self.ensure_available()?;
        Ok(self.work_area)
    }
}
