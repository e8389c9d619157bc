//! Focus-mode window controller.
//!
//! [`FocusWindowController`] is a two-state machine that shrinks the main window
//! into a compact, always-on-top panel anchored to the bottom-left corner of the
//! work area, keeps it sized to the focused list while content changes, and
//! restores the original bounds on exit.
//!
//! # State Machine
//!
//! ```text
//!            enter(h)                    update_size(h)
//!   Normal ───────────▶ Focused ◀──────────────────────┐
//!     ▲                   │  └─────────────────────────┘
//!     └──────exit()───────┘
//! ```
//!
//! # Geometry
//!
//! ```text
//! height = min(content + chrome_padding, max_height_ratio * work_area.height)
//! x      = work_area.x                       (enter; update_size keeps current x)
//! y      = work_area.y + work_area.height - height
//! ```
//!
//! # Failure Semantics
//!
//! `enter` refuses with [`BoostFocusError::WindowUnavailable`] when there is no
//! window. Any host failure after that point is returned to the caller, but
//! the state still advances so the UI is never stuck mid-transition. The
//! captured geometry is single-use: every `enter` overwrites it and every
//! `exit` discards it.

use super::host::{WindowHost, WindowLevel};
use super::observer::{ContentHeightObserver, ResizeTicket};
use crate::domain::{BoostFocusError, Result, WindowGeometry, WorkArea};
use crate::FocusConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Whether the window is currently in focus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusModeState {
    #[default]
    Normal,
    Focused,
}

/// Result of a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUpdate {
    /// The window now has these bounds.
    Resized(WindowGeometry),
    /// The controller is in [`FocusModeState::Normal`]; nothing was changed.
    NotInFocusMode,
}

/// How the window was put back on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The bounds captured by the matching `enter` were restored.
    Restored(WindowGeometry),
    /// No bounds were captured (e.g. the process restarted in focus mode), so
    /// the configured fallback size was applied and the window centered.
    Fallback,
}

/// Owns the focus-mode state, the captured geometry and the window host.
///
/// One instance per application window. Calls are expected to be serialized
/// by the caller; there is no internal locking.
#[derive(Debug)]
pub struct FocusWindowController<H> {
    host: H,
    config: FocusConfig,
    state: FocusModeState,
    saved: Option<WindowGeometry>,
    observer: ContentHeightObserver,
}

impl<H: WindowHost> FocusWindowController<H> {
    #[must_use]
    pub fn new(host: H, config: FocusConfig) -> Self {
        let observer = ContentHeightObserver::new(
            Duration::from_millis(config.debounce_ms),
            config.observer_padding,
        );
        Self {
            host,
            config,
            state: FocusModeState::Normal,
            saved: None,
            observer,
        }
    }

    #[must_use]
    pub const fn state(&self) -> FocusModeState {
        self.state
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state == FocusModeState::Focused
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Bounds that `exit` would restore, if any were captured.
    #[must_use]
    pub const fn captured_geometry(&self) -> Option<WindowGeometry> {
        self.saved
    }

    #[must_use]
    pub const fn observer(&self) -> &ContentHeightObserver {
        &self.observer
    }

    /// Height the focus window should have for `content_height` in `work_area`.
    ///
    /// Never exceeds `max_height_ratio` of the work area and is at least 1px.
    /// Negative or non-finite measurements count as zero.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::WindowHost`] when the capped height is below 1px,
    /// i.e. the work area is degenerate.
    ///
    /// # Examples
    ///
    /// ```
    /// use boostfocus::window::{FocusWindowController, VirtualWindow};
    /// use boostfocus::{FocusConfig, WorkArea};
    ///
    /// let controller = FocusWindowController::new(VirtualWindow::default(), FocusConfig::default());
    /// let area = WorkArea::new(0, 0, 1000, 800);
    /// assert_eq!(controller.target_height(300.0, &area)?, 310);
    /// assert_eq!(controller.target_height(5000.0, &area)?, 640);
    /// assert!(controller.target_height(300.0, &WorkArea::new(0, 0, 1000, 1)).is_err());
    /// # Ok::<(), boostfocus::BoostFocusError>(())
    /// ```
    pub fn target_height(&self, content_height: f64, work_area: &WorkArea) -> Result<i32> {
        let content = if content_height.is_finite() {
            content_height.max(0.0)
        } else {
            0.0
        };
        let desired = (content + self.config.chrome_padding).ceil();
        let cap = (f64::from(work_area.height) * self.config.max_height_ratio).floor();
        if cap < 1.0 {
            return Err(BoostFocusError::WindowHost(format!(
                "work area too small for focus mode: {}px tall",
                work_area.height
            )));
        }

        #[allow(clippy::cast_possible_truncation)]
        let height = desired.min(cap).max(1.0) as i32;
        Ok(height)
    }

    /// Enters focus mode.
    ///
    /// Captures the current bounds, resizes to the fixed focus width and the
    /// content-derived height, anchors the window to the bottom-left of the
    /// work area and raises it to the floating level. Calling `enter` while
    /// already focused only resizes (the original bounds stay captured).
    ///
    /// # Errors
    ///
    /// - [`BoostFocusError::WindowUnavailable`] if there is no window; the state
    ///   is left unchanged.
    /// - Any host error from the individual steps; the state still becomes
    ///   [`FocusModeState::Focused`].
    pub fn enter(&mut self, content_height: f64) -> Result<WindowGeometry> {
        let _span = tracing::debug_span!("focus_enter", content_height).entered();

        if self.is_focused() {
            tracing::debug!("already in focus mode, resizing only");
            return match self.update_size(content_height)? {
                SizeUpdate::Resized(bounds) => Ok(bounds),
                SizeUpdate::NotInFocusMode => self.host.geometry(),
            };
        }

        if !self.host.is_available() {
            tracing::debug!("no window to put into focus mode");
            return Err(BoostFocusError::WindowUnavailable);
        }

        let result = self.apply_enter(content_height);
        self.state = FocusModeState::Focused;
        self.observer.connect();

        match &result {
            Ok(bounds) => tracing::debug!(?bounds, "entered focus mode"),
            Err(e) => tracing::warn!(error = %e, "entered focus mode with errors"),
        }
        result
    }

    fn apply_enter(&mut self, content_height: f64) -> Result<WindowGeometry> {
        self.saved = None;
        let original = self.host.geometry()?;
        self.saved = Some(original);
        tracing::trace!(?original, "captured window geometry");

        let work_area = self.host.work_area()?;
        let width = self.config.width;
        let height = self.target_height(content_height, &work_area)?;
        self.host.set_size(width, height)?;

        let bounds = WindowGeometry::new(width, height, work_area.x, work_area.bottom() - height);
        self.host.set_position(bounds.x, bounds.y)?;
        self.host.set_always_on_top(true, WindowLevel::Floating)?;

        Ok(bounds)
    }

    /// Re-fits the focus window to a new content height.
    ///
    /// Keeps the current `x` and re-pins the bottom edge to the work area.
    /// Applying the same height twice yields the same bounds.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::WindowUnavailable`] or host errors. Being in normal
    /// mode is not an error; it returns [`SizeUpdate::NotInFocusMode`].
    pub fn update_size(&mut self, content_height: f64) -> Result<SizeUpdate> {
        let _span = tracing::debug_span!("focus_update_size", content_height).entered();

        if !self.is_focused() {
            tracing::debug!("resize requested outside focus mode");
            return Ok(SizeUpdate::NotInFocusMode);
        }
        if !self.host.is_available() {
            return Err(BoostFocusError::WindowUnavailable);
        }

        let work_area = self.host.work_area()?;
        let (x, _) = self.host.position()?;
        let height = self.target_height(content_height, &work_area)?;
        let bounds = WindowGeometry::new(self.config.width, height, x, work_area.bottom() - height);
        self.host.set_bounds(bounds)?;

        tracing::debug!(?bounds, "focus window resized");
        Ok(SizeUpdate::Resized(bounds))
    }

    /// Leaves focus mode.
    ///
    /// Drops the always-on-top flag and restores the bounds captured by the
    /// matching `enter`, or falls back to the configured default size centered
    /// on screen. The captured bounds are discarded either way, and the state
    /// becomes [`FocusModeState::Normal`] even if a host call fails.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::WindowUnavailable`] or host errors.
    pub fn exit(&mut self) -> Result<ExitOutcome> {
        let _span = tracing::debug_span!("focus_exit", state = ?self.state).entered();

        let saved = self.saved.take();
        self.state = FocusModeState::Normal;
        self.observer.disconnect();

        if !self.host.is_available() {
            tracing::debug!("window gone before focus mode could be undone");
            return Err(BoostFocusError::WindowUnavailable);
        }

        self.host.set_always_on_top(false, WindowLevel::Normal)?;

        if let Some(bounds) = saved {
            self.host.set_bounds(bounds)?;
            tracing::debug!(?bounds, "restored window geometry");
            Ok(ExitOutcome::Restored(bounds))
        } else {
            self.host
                .set_size(self.config.fallback_width, self.config.fallback_height)?;
            self.host.center()?;
            tracing::debug!(
                width = self.config.fallback_width,
                height = self.config.fallback_height,
                "no captured geometry, applied fallback size"
            );
            Ok(ExitOutcome::Fallback)
        }
    }

    /// Feeds a content measurement into the debouncer.
    ///
    /// Ignored (returns `None`) outside focus mode.
    pub fn content_resized(&mut self, height: f64, now: Instant) -> Option<ResizeTicket> {
        self.observer.notify(height, now)
    }

    /// Applies a settled measurement, if one is due.
    pub fn flush_resize(&mut self, now: Instant) -> Option<Result<SizeUpdate>> {
        let height = self.observer.poll(now)?;
        Some(self.update_size(height))
    }

    /// Timer-callback variant of [`flush_resize`](Self::flush_resize).
    pub fn fire_resize(&mut self, ticket: ResizeTicket, now: Instant) -> Option<Result<SizeUpdate>> {
        let height = self.observer.fire(ticket, now)?;
        Some(self.update_size(height))
    }

    /// When the next debounced resize becomes due.
    #[must_use]
    pub fn next_resize_due(&self) -> Option<Instant> {
        self.observer.due_at()
    }
}
