//! Todo view derivation: the ordered list the page actually shows.
//!
//! [`derive`] composes view selection, focus partitioning and sorting:
//!
//! ```text
//! focus mode:  focused && !archived  →  sort
//! otherwise:   select(view)  →  partition_by_focus  →  sort each  →  focused ++ rest
//! ```
//!
//! Focused todos are pinned above everything else regardless of sort key or
//! direction. The input slice is never mutated; the result borrows from it.

use super::filter::{partition_by_focus, select, ViewOption};
use super::sort::{sort_todos, SortKey};
use crate::domain::TodoItem;
use serde::{Deserialize, Serialize};

/// Parameters of a list derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub focus_mode: bool,
    pub view: ViewOption,
    pub sort_key: SortKey,
    pub ascending: bool,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            focus_mode: false,
            view: ViewOption::Active,
            sort_key: SortKey::Deadline,
            ascending: true,
        }
    }
}

/// Aggregate counts shown on the view tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewStats {
    pub active: usize,
    pub archived: usize,
    pub total: usize,
}

impl ViewStats {
    #[must_use]
    pub const fn count_for(&self, view: ViewOption) -> usize {
        match view {
            ViewOption::Active => self.active,
            ViewOption::Archived => self.archived,
            ViewOption::All => self.total,
        }
    }
}

/// Produces the ordered list of todos to display.
///
/// # Examples
///
/// ```
/// use boostfocus::view::{derive, ViewQuery};
/// use boostfocus::TodoItem;
///
/// let now = chrono::Utc::now();
/// let mut pinned = TodoItem::new("pinned", None, now);
/// pinned.focused = true;
/// let dated = TodoItem::new("dated", Some(now), now);
/// let todos = vec![dated, pinned];
///
/// let shown = derive(&todos, &ViewQuery::default());
/// assert_eq!(shown[0].text, "pinned");
/// ```
#[must_use]
pub fn derive<'a>(todos: &'a [TodoItem], query: &ViewQuery) -> Vec<&'a TodoItem> {
    let _span = tracing::trace_span!("derive_view",
        total = todos.len(),
        focus_mode = query.focus_mode,
        view = ?query.view,
        sort_key = ?query.sort_key,
        ascending = query.ascending
    )
    .entered();

    if query.focus_mode {
        let mut shown: Vec<&TodoItem> = todos
            .iter()
            .filter(|todo| todo.focused && !todo.archived)
            .collect();
        sort_todos(&mut shown, query.sort_key, query.ascending);
        return shown;
    }

    let (mut focused, mut rest) = partition_by_focus(select(todos, query.view));
    sort_todos(&mut focused, query.sort_key, query.ascending);
    sort_todos(&mut rest, query.sort_key, query.ascending);

    focused.append(&mut rest);
    focused
}

/// Counts active, archived and total todos.
#[must_use]
pub fn stats(todos: &[TodoItem]) -> ViewStats {
    let archived = todos.iter().filter(|todo| todo.archived).count();
    ViewStats {
        active: todos.len() - archived,
        archived,
        total: todos.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(id: &str, focused: bool, archived: bool, deadline: Option<&str>) -> TodoItem {
        let created = Utc.with_ymd_and_hms(2029, 1, 1, 0, 0, 0).unwrap();
        let deadline = deadline.map(|d| d.parse().unwrap());
        let mut item = TodoItem::new(id, deadline, created);
        item.id = id.to_string();
        item.focused = focused;
        item.archived = archived;
        item
    }

    fn ids(todos: &[&TodoItem]) -> Vec<String> {
        todos.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn focus_pin_overrides_deadline_order() {
        let todos = vec![
            todo("1", false, false, Some("2030-01-01T00:00:00Z")),
            todo("2", true, false, None),
        ];
        let query = ViewQuery {
            focus_mode: false,
            view: ViewOption::Active,
            sort_key: SortKey::Deadline,
            ascending: true,
        };
        assert_eq!(ids(&derive(&todos, &query)), ["2", "1"]);
    }

    #[test]
    fn focus_mode_hides_archived_and_unfocused() {
        let todos = vec![
            todo("a", true, true, None),
            todo("b", true, false, None),
            todo("c", false, false, None),
        ];
        let query = ViewQuery { focus_mode: true, view: ViewOption::All, ..ViewQuery::default() };
        assert_eq!(ids(&derive(&todos, &query)), ["b"]);
    }

    #[test]
    fn partitions_are_sorted_independently() {
        let todos = vec![
            todo("late", false, false, Some("2030-03-01T00:00:00Z")),
            todo("pinned-late", true, false, Some("2030-02-01T00:00:00Z")),
            todo("early", false, false, Some("2030-01-01T00:00:00Z")),
            todo("pinned-early", true, false, Some("2030-01-15T00:00:00Z")),
        ];
        let asc = ViewQuery::default();
        assert_eq!(ids(&derive(&todos, &asc)), ["pinned-early", "pinned-late", "early", "late"]);

        let desc = ViewQuery { ascending: false, ..asc };
        assert_eq!(ids(&derive(&todos, &desc)), ["pinned-late", "pinned-early", "late", "early"]);
    }

    #[test]
    fn derive_leaves_input_untouched() {
        let todos = vec![
            todo("b", false, false, Some("2030-03-01T00:00:00Z")),
            todo("a", false, false, Some("2030-01-01T00:00:00Z")),
        ];
        let before = todos.clone();
        let first = ids(&derive(&todos, &ViewQuery::default()));
        let second = ids(&derive(&todos, &ViewQuery::default()));
        assert_eq!(todos, before);
        assert_eq!(first, second);
    }

    #[test]
    fn stats_count_each_bucket() {
        let todos = vec![
            todo("a", false, true, None),
            todo("b", false, false, None),
            todo("c", true, false, None),
        ];
        let stats = stats(&todos);
        assert_eq!(stats, ViewStats { active: 2, archived: 1, total: 3 });
        assert_eq!(stats.count_for(ViewOption::Archived), 1);
    }
}
