//! Boost Focus core: todo view derivation, deadline clock and focus-mode window control.
//!
//! Boost Focus is a desktop todo app whose "focus mode" shrinks the main window
//! into a small always-on-top panel listing only the focused todos. This crate
//! holds everything below the UI toolkit:
//! - Pure derivation of the displayed list (view filter, focus pinning, sorting)
//! - Countdown labels and once-per-crossing overdue notifications
//! - The Normal/Focused window state machine behind a [`WindowHost`] trait
//! - A typed request/response contract between page and main process
//! - Page state, events and a display-ready view model
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Headless shell (main.rs)                           │  ← JSON lines on stdio
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/, ui/)                      │  ← Page state machine
//! │  - Event handling, optimistic updates               │
//! │  - Overdue tracking, view model                     │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View Layer    │   │ IPC Layer     │   │ Window Layer  │
//! │ (view/)       │   │ (ipc/)        │   │ (window/)     │
//! │ - Filter/sort │   │ - Requests    │   │ - Controller  │
//! │ - Deadlines   │   │ - Dispatcher  │   │ - Debounce    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - TodoStore trait (storage/)                       │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Errors, todos, geometry (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Page state with event/action model
//! - [`domain`]: Core types (todo, geometry, errors)
//! - [`infrastructure`]: Platform paths
//! - [`ipc`]: Request/response contract and dispatcher
//! - [`storage`]: Todo store trait and in-memory store
//! - [`ui`]: Page view model
//! - [`view`]: List derivation and deadline clock
//! - [`window`]: Focus-mode window controller
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Read from `<config_dir>/boostfocus/config.toml` (see
//! [`infrastructure::get_config_path`]); every key is optional:
//!
//! ```toml
//! trace_level = "debug"
//! default_view = "all"
//! default_sort = "created"
//! sort_ascending = false
//!
//! [focus]
//! width = 420
//! max_height_ratio = 0.75
//! debounce_ms = 150
//! ```
//!
//! # Example
//!
//! ```rust
//! use boostfocus::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Load)?;
//! assert!(matches!(actions.as_slice(), [Action::Send(_)]));
//! # Ok::<(), boostfocus::BoostFocusError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ipc;
pub mod storage;
pub mod ui;
pub mod view;
pub mod window;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{BoostFocusError, Result, TodoItem, WindowGeometry, WorkArea};
pub use ipc::{Dispatcher, Envelope, Request, Response};
pub use storage::{MemoryTodoStore, TodoStore};
pub use view::{SortKey, ViewOption, ViewQuery};
pub use window::{FocusWindowController, VirtualWindow, WindowHost};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Geometry rules for focus mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Fixed focus-window width in pixels. Default: 400
    pub width: i32,

    /// Added to the measured content height for window chrome. Default: 10
    pub chrome_padding: f64,

    /// Upper bound on height as a fraction of the work area. Default: 0.8
    pub max_height_ratio: f64,

    /// Size applied on exit when no geometry was captured. Default: 800x600
    pub fallback_width: i32,
    pub fallback_height: i32,

    /// Quiet period before a content resize is applied. Default: 100
    pub debounce_ms: u64,

    /// Added by the content observer to each measurement. Default: 10
    pub observer_padding: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            width: 400,
            chrome_padding: 10.0,
            max_height_ratio: 0.8,
            fallback_width: 800,
            fallback_height: 600,
            debounce_ms: 100,
            observer_padding: 10.0,
        }
    }
}

impl FocusConfig {
    /// # Errors
    ///
    /// [`BoostFocusError::Config`] for non-positive sizes, a ratio outside
    /// `(0, 1]` or negative paddings.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.fallback_width <= 0 || self.fallback_height <= 0 {
            return Err(BoostFocusError::Config("focus window sizes must be positive".to_string()));
        }
        if !(self.max_height_ratio > 0.0 && self.max_height_ratio <= 1.0) {
            return Err(BoostFocusError::Config(format!(
                "max_height_ratio must be in (0, 1], got {}",
                self.max_height_ratio
            )));
        }
        if self.chrome_padding < 0.0 || self.observer_padding < 0.0 {
            return Err(BoostFocusError::Config("paddings must not be negative".to_string()));
        }
        Ok(())
    }
}

/// Application configuration.
///
/// Built from a TOML file ([`Config::from_file`]), from flat key/value pairs
/// handed over by a host ([`Config::from_map`]), or [`Config::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// Where trace files go. Default: platform data dir (see [`infrastructure::get_data_dir`]).
    pub data_dir: Option<PathBuf>,

    pub default_view: ViewOption,
    pub default_sort: SortKey,
    pub sort_ascending: bool,

    pub focus: FocusConfig,

    /// Display work area used by the headless shell's virtual window.
    pub work_area: WorkArea,

    /// Starting bounds of the headless shell's virtual window.
    pub initial_window: WindowGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            data_dir: None,
            default_view: ViewOption::Active,
            default_sort: SortKey::Deadline,
            sort_ascending: true,
            focus: FocusConfig::default(),
            work_area: WorkArea::default(),
            initial_window: WindowGeometry::new(800, 600, 320, 150),
        }
    }
}

fn parse_or<T: FromStr>(map: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match map.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(key, value = %raw, "unparseable config value, using default");
            default
        }),
        None => default,
    }
}

impl Config {
    /// Reads and validates a TOML config file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::Io`] if the file cannot be read,
    /// [`BoostFocusError::Config`] if it is not valid TOML or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| BoostFocusError::Config(format!("{}: {e}", path.as_ref().display())))?;
        config.focus.validate()?;
        Ok(config)
    }

    /// Resolves the configuration for a process.
    ///
    /// An explicit `path` must exist. Without one, the default config file is
    /// used when present, else built-in defaults.
    ///
    /// # Errors
    ///
    /// Any error from [`Config::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = infrastructure::get_config_path();
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses flat string pairs, falling back to defaults per key.
    ///
    /// # Parsing Rules
    ///
    /// - `default_view`: `active` | `archived` | `all`
    /// - `default_sort`: `deadline` | `created` | `text` | `completed`
    /// - `sort_ascending`: `true` | `false`
    /// - `focus_*`: the [`FocusConfig`] fields (`focus_width`, `focus_debounce_ms`, ...)
    /// - anything unparseable, or a focus section failing validation, keeps its default
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use boostfocus::{Config, SortKey};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_sort".to_string(), "text".to_string());
    /// map.insert("focus_width".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.default_sort, SortKey::Text);
    /// assert_eq!(config.focus.width, 400);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let fd = FocusConfig::default();

        let focus = FocusConfig {
            width: parse_or(map, "focus_width", fd.width),
            chrome_padding: parse_or(map, "focus_chrome_padding", fd.chrome_padding),
            max_height_ratio: parse_or(map, "focus_max_height_ratio", fd.max_height_ratio),
            fallback_width: parse_or(map, "focus_fallback_width", fd.fallback_width),
            fallback_height: parse_or(map, "focus_fallback_height", fd.fallback_height),
            debounce_ms: parse_or(map, "focus_debounce_ms", fd.debounce_ms),
            observer_padding: parse_or(map, "focus_observer_padding", fd.observer_padding),
        };
        let focus = match focus.validate() {
            Ok(()) => focus,
            Err(e) => {
                tracing::debug!(error = %e, "invalid focus settings, using defaults");
                fd
            }
        };

        Self {
            trace_level: map.get("trace_level").cloned(),
            data_dir: map.get("data_dir").map(|dir| infrastructure::expand_tilde(dir)),
            default_view: map
                .get("default_view")
                .and_then(|v| ViewOption::parse(v))
                .unwrap_or(defaults.default_view),
            default_sort: map
                .get("default_sort")
                .and_then(|v| SortKey::parse(v))
                .unwrap_or(defaults.default_sort),
            sort_ascending: parse_or(map, "sort_ascending", defaults.sort_ascending),
            focus,
            ..defaults
        }
    }

    /// The initial page query derived from the defaults above.
    #[must_use]
    pub const fn view_query(&self) -> ViewQuery {
        ViewQuery {
            focus_mode: false,
            view: self.default_view,
            sort_key: self.default_sort,
            ascending: self.sort_ascending,
        }
    }
}

/// Creates the page state for a configuration.
///
/// The state starts in `loading`; feed it [`Event::Load`] to request todos.
///
/// # Example
///
/// ```rust
/// use boostfocus::{initialize, Config, ViewOption};
///
/// let config = Config { default_view: ViewOption::All, ..Config::default() };
/// let state = initialize(&config);
/// assert_eq!(state.query.view, ViewOption::All);
/// assert!(state.loading);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(view = ?config.default_view, sort = ?config.default_sort, "initializing page state");
    AppState::new(config.view_query())
}
