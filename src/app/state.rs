//! Page state and view model computation.
//!
//! [`AppState`] is the renderer-side single source of truth: the last todo
//! snapshot received from the main process plus the user's view settings.
//! Everything the page shows is derived from it on demand.

use super::overdue::OverdueTracker;
use crate::domain::TodoItem;
use crate::ui::viewmodel::{PageViewModel, SortButton, TodoRow, ViewTab};
use crate::view::deadline::{format_countdown, remaining};
use crate::view::{derive, stats, SortKey, ViewOption, ViewQuery, ViewStats};
use chrono::{DateTime, Utc};

const EMPTY_MESSAGE: &str = "No tasks yet. Add one above!";

/// Central page state.
///
/// Mutated by [`handle_event`](super::handle_event) only.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last authoritative snapshot, with optimistic edits applied on top.
    pub todos: Vec<TodoItem>,

    /// Set until the first `Todos` reply arrives, and again while reloading.
    pub loading: bool,

    /// Most recent command failure, cleared by the next full reload.
    pub error: Option<String>,

    /// Focus mode flag, view, sort key and direction.
    pub query: ViewQuery,

    pub overdue: OverdueTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewQuery::default())
    }
}

impl AppState {
    #[must_use]
    pub fn new(query: ViewQuery) -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            error: None,
            query,
            overdue: OverdueTracker::new(),
        }
    }

    /// Todos in display order for the current query.
    #[must_use]
    pub fn displayed_todos(&self) -> Vec<&TodoItem> {
        derive(&self.todos, &self.query)
    }

    #[must_use]
    pub fn stats(&self) -> ViewStats {
        stats(&self.todos)
    }

    /// Applies a sort button press.
    ///
    /// Pressing the active key flips the direction; any other key becomes
    /// active in ascending order.
    pub fn change_sort(&mut self, key: SortKey) {
        if self.query.sort_key == key {
            self.query.ascending = !self.query.ascending;
        } else {
            self.query.sort_key = key;
            self.query.ascending = true;
        }
        tracing::debug!(sort_key = ?key, ascending = self.query.ascending, "sort changed");
    }

    /// Computes everything the page renders at instant `now`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boostfocus::AppState;
    ///
    /// let mut state = AppState::default();
    /// state.loading = false;
    /// let vm = state.compute_viewmodel(chrono::Utc::now());
    /// assert_eq!(vm.empty_message.as_deref(), Some("No tasks yet. Add one above!"));
    /// assert_eq!(vm.tabs[0].label, "Active");
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> PageViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", total = self.todos.len()).entered();

        let rows: Vec<TodoRow> = self
            .displayed_todos()
            .into_iter()
            .map(|todo| Self::compute_row(todo, now))
            .collect();

        let focus_mode = self.query.focus_mode;
        let (tabs, sort_buttons) = if focus_mode {
            (vec![], vec![])
        } else {
            (self.compute_tabs(), self.compute_sort_buttons())
        };

        let empty_message = (rows.is_empty() && !self.loading).then(|| EMPTY_MESSAGE.to_string());

        PageViewModel {
            rows,
            tabs,
            sort_buttons,
            show_form: !focus_mode,
            focus_mode,
            loading: self.loading,
            error: self.error.clone(),
            empty_message,
        }
    }

    fn compute_row(todo: &TodoItem, now: DateTime<Utc>) -> TodoRow {
        TodoRow {
            id: todo.id.clone(),
            text: todo.text.clone(),
            completed: todo.completed,
            archived: todo.archived,
            focused: todo.focused,
            countdown: todo.deadline.map(|deadline| format_countdown(remaining(deadline, now))),
            overdue: todo.is_overdue(now),
        }
    }

    fn compute_tabs(&self) -> Vec<ViewTab> {
        let stats = self.stats();
        ViewOption::ALL
            .iter()
            .map(|&view| {
                let (name, title) = match view {
                    ViewOption::Active => ("Active", "Show active todos"),
                    ViewOption::Archived => ("Archived", "Show archived todos"),
                    ViewOption::All => ("All", "Show all todos"),
                };
                let count = stats.count_for(view);
                let label = if count > 0 {
                    format!("{name} ({count})")
                } else {
                    name.to_string()
                };
                ViewTab {
                    view,
                    label,
                    title: title.to_string(),
                    active: self.query.view == view,
                }
            })
            .collect()
    }

    fn compute_sort_buttons(&self) -> Vec<SortButton> {
        SortKey::ALL
            .iter()
            .map(|&key| {
                let (prefix, asc, desc) = match key {
                    SortKey::Deadline => ("Sort by deadline", "(earliest first)", "(latest first)"),
                    SortKey::CreatedAt => ("Sort by creation date", "(oldest first)", "(newest first)"),
                    SortKey::Text => ("Sort alphabetically", "(A-Z)", "(Z-A)"),
                    SortKey::Completed => {
                        ("Sort by completion status", "(incomplete first)", "(complete first)")
                    }
                };
                let active = self.query.sort_key == key;
                let direction = if active && self.query.ascending { asc } else { desc };
                SortButton {
                    key,
                    title: format!("{prefix} {direction}"),
                    active,
                    ascending: active.then_some(self.query.ascending),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn loaded(todos: Vec<TodoItem>) -> AppState {
        let mut state = AppState::default();
        state.todos = todos;
        state.loading = false;
        state
    }

    #[test]
    fn tab_labels_omit_zero_counts() {
        let mut archived = TodoItem::new("old", None, now());
        archived.archived = true;
        let state = loaded(vec![TodoItem::new("new", None, now()), archived]);

        let labels: Vec<String> = state.compute_viewmodel(now()).tabs.into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Active (1)", "Archived (1)", "All (2)"]);

        let empty = loaded(vec![]);
        let labels: Vec<String> = empty.compute_viewmodel(now()).tabs.into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Active", "Archived", "All"]);
    }

    #[test]
    fn sort_titles_follow_active_direction() {
        let mut state = loaded(vec![]);
        let titles = |state: &AppState| -> Vec<String> {
            state.compute_viewmodel(now()).sort_buttons.into_iter().map(|b| b.title).collect()
        };

        assert_eq!(
            titles(&state),
            [
                "Sort by deadline (earliest first)",
                "Sort by creation date (newest first)",
                "Sort alphabetically (Z-A)",
                "Sort by completion status (complete first)",
            ]
        );

        state.change_sort(SortKey::Deadline);
        assert!(!state.query.ascending);
        assert_eq!(titles(&state)[0], "Sort by deadline (latest first)");

        state.change_sort(SortKey::Text);
        assert!(state.query.ascending);
        assert_eq!(titles(&state)[2], "Sort alphabetically (A-Z)");
    }

    #[test]
    fn focus_mode_hides_form_and_controls() {
        let mut pinned = TodoItem::new("pinned", None, now());
        pinned.focused = true;
        let mut state = loaded(vec![pinned, TodoItem::new("other", None, now())]);
        state.query.focus_mode = true;

        let vm = state.compute_viewmodel(now());
        assert!(!vm.show_form);
        assert!(vm.tabs.is_empty() && vm.sort_buttons.is_empty());
        assert_eq!(vm.rows.len(), 1);
        assert_eq!(vm.rows[0].text, "pinned");
    }

    #[test]
    fn rows_carry_countdown_and_overdue_flag() {
        let soon = TodoItem::new("soon", Some(now() + Duration::minutes(90)), now());
        let late = TodoItem::new("late", Some(now() - Duration::seconds(1)), now());
        let state = loaded(vec![soon, late]);

        let rows = state.compute_viewmodel(now()).rows;
        assert_eq!(rows[0].text, "late");
        assert_eq!(rows[0].countdown.as_deref(), Some("Overdue"));
        assert!(rows[0].overdue);
        assert_eq!(rows[1].countdown.as_deref(), Some("1h 30m"));
        assert!(!rows[1].overdue);
    }

    #[test]
    fn no_empty_message_while_loading() {
        let state = AppState::default();
        let vm = state.compute_viewmodel(now());
        assert!(vm.loading);
        assert_eq!(vm.empty_message, None);
    }
}
