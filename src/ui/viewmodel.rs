//! View model types representing the renderable todo page.
//!
//! View models are computed by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and contain no business logic, only display-ready data. They serialize to
//! camelCase JSON so a web renderer can consume them directly.

use crate::view::{SortKey, ViewOption};
use serde::Serialize;

/// Complete page state for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewModel {
    /// Rows in display order.
    pub rows: Vec<TodoRow>,

    /// View selector buttons. Empty in focus mode.
    pub tabs: Vec<ViewTab>,

    /// Sort buttons. Empty in focus mode.
    pub sort_buttons: Vec<SortButton>,

    /// Whether the add-todo form is shown.
    pub show_form: bool,

    pub focus_mode: bool,

    /// "Loading todos..." placeholder replaces the list while set.
    pub loading: bool,

    pub error: Option<String>,

    /// Shown instead of rows when the list is empty.
    pub empty_message: Option<String>,
}

/// One todo as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub archived: bool,
    pub focused: bool,

    /// Countdown label, `None` without a deadline.
    pub countdown: Option<String>,

    pub overdue: bool,
}

/// A view selector button, e.g. `Active (3)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTab {
    pub view: ViewOption,
    pub label: String,
    pub title: String,
    pub active: bool,
}

/// A sort button with its tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortButton {
    pub key: SortKey,
    pub title: String,
    pub active: bool,

    /// Direction indicator, only on the active button.
    pub ascending: Option<bool>,
}
