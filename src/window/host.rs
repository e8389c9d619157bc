//! Window host abstraction.
//!
//! The [`WindowHost`] trait is the boundary between the focus controller and
//! whatever actually owns the native window (a GUI toolkit in the app, an
//! in-memory [`VirtualWindow`](super::VirtualWindow) in the headless shell and
//! tests). Each method maps to one native call.

use crate::domain::{Result, WindowGeometry, WorkArea};
use serde::{Deserialize, Serialize};

/// Stacking level used together with the always-on-top flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowLevel {
    #[default]
    Normal,
    /// Above regular windows, below system overlays.
    Floating,
}

/// Native window operations consumed by the focus controller.
///
/// Implementations return [`BoostFocusError::WindowUnavailable`](crate::BoostFocusError::WindowUnavailable)
/// when there is no window handle, and
/// [`BoostFocusError::WindowHost`](crate::BoostFocusError::WindowHost) for
/// other native failures.
pub trait WindowHost {
    /// Whether a live window handle exists right now.
    fn is_available(&self) -> bool;

    /// Current outer size as `(width, height)`.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn size(&self) -> Result<(i32, i32)>;

    /// Current top-left position as `(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn position(&self) -> Result<(i32, i32)>;

    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn set_size(&mut self, width: i32, height: i32) -> Result<()>;

    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn set_position(&mut self, x: i32, y: i32) -> Result<()>;

    /// Applies size and position together.
    ///
    /// Hosts with an atomic "set bounds" call should override this to avoid an
    /// intermediate frame at the new size but old position.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or either native call fails.
    fn set_bounds(&mut self, bounds: WindowGeometry) -> Result<()> {
        self.set_size(bounds.width, bounds.height)?;
        self.set_position(bounds.x, bounds.y)
    }

    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn set_always_on_top(&mut self, on_top: bool, level: WindowLevel) -> Result<()>;

    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn is_always_on_top(&self) -> Result<bool>;

    /// Centers the window within its display's work area.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn center(&mut self) -> Result<()>;

    /// Work area of the display the window is currently on.
    ///
    /// Queried on every call: the user may move the window between displays.
    ///
    /// # Errors
    ///
    /// Fails if the window is gone or the native call fails.
    fn work_area(&self) -> Result<WorkArea>;

    /// Size and position in one snapshot.
    ///
    /// # Errors
    ///
    /// Fails if either query fails.
    fn geometry(&self) -> Result<WindowGeometry> {
        let (width, height) = self.size()?;
        let (x, y) = self.position()?;
        Ok(WindowGeometry::new(width, height, x, y))
    }
}

impl<H: WindowHost + ?Sized> WindowHost for Box<H> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn size(&self) -> Result<(i32, i32)> {
        (**self).size()
    }

    fn position(&self) -> Result<(i32, i32)> {
        (**self).position()
    }

    fn set_size(&mut self, width: i32, height: i32) -> Result<()> {
        (**self).set_size(width, height)
    }

    fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        (**self).set_position(x, y)
    }

    fn set_bounds(&mut self, bounds: WindowGeometry) -> Result<()> {
        (**self).set_bounds(bounds)
    }

    fn set_always_on_top(&mut self, on_top: bool, level: WindowLevel) -> Result<()> {
        (**self).set_always_on_top(on_top, level)
    }

    fn is_always_on_top(&self) -> Result<bool> {
        (**self).is_always_on_top()
    }

    fn center(&mut self) -> Result<()> {
        (**self).center()
    }

    fn work_area(&self) -> Result<WorkArea> {
        (**self).work_area()
    }
}
