//! Edge-triggered overdue notifications.
//!
//! The page polls once a second. [`OverdueTracker`] remembers, per todo, whether
//! it was overdue on the previous poll and for which deadline, so each crossing
//! into the overdue state is reported exactly once.

use crate::domain::TodoItem;
use crate::view::deadline::{is_overdue, just_became_overdue};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A todo that became overdue since the previous poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueNotice {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Observed {
    deadline: Option<DateTime<Utc>>,
    overdue: bool,
}

/// Per-todo memory of the previous overdue flag.
#[derive(Debug, Clone, Default)]
pub struct OverdueTracker {
    observed: HashMap<String, Observed>,
}

impl OverdueTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `todos` against the previous poll and returns fresh crossings.
    ///
    /// A changed deadline resets the remembered flag, so editing an overdue
    /// todo to a future deadline re-arms its notification. Todos missing from
    /// `todos` are forgotten.
    ///
    /// # Examples
    ///
    /// ```
    /// use boostfocus::app::OverdueTracker;
    /// use boostfocus::TodoItem;
    /// use chrono::{Duration, Utc};
    ///
    /// let now = Utc::now();
    /// let todos = vec![TodoItem::new("report", Some(now + Duration::seconds(1)), now)];
    /// let mut tracker = OverdueTracker::new();
    ///
    /// assert!(tracker.poll(&todos, now).is_empty());
    /// assert_eq!(tracker.poll(&todos, now + Duration::seconds(2)).len(), 1);
    /// assert!(tracker.poll(&todos, now + Duration::seconds(3)).is_empty());
    /// ```
    pub fn poll(&mut self, todos: &[TodoItem], now: DateTime<Utc>) -> Vec<OverdueNotice> {
        let mut notices = Vec::new();
        let mut next = HashMap::with_capacity(todos.len());

        for todo in todos {
            let previous = self
                .observed
                .get(&todo.id)
                .filter(|seen| seen.deadline == todo.deadline)
                .is_some_and(|seen| seen.overdue);
            let current = is_overdue(todo.deadline, now, todo.completed);

            if just_became_overdue(previous, current) {
                tracing::debug!(id = %todo.id, "todo became overdue");
                notices.push(OverdueNotice {
                    id: todo.id.clone(),
                    text: todo.text.clone(),
                });
            }
            next.insert(
                todo.id.clone(),
                Observed {
                    deadline: todo.deadline,
                    overdue: current,
                },
            );
        }

        self.observed = next;
        notices
    }

    /// Number of todos currently remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    fn todo(id: &str, deadline: Option<DateTime<Utc>>) -> TodoItem {
        let mut item = TodoItem::new(id, deadline, at(0));
        item.id = id.to_string();
        item
    }

    #[test]
    fn fires_once_per_crossing() {
        let mut tracker = OverdueTracker::new();
        let todos = vec![todo("a", Some(at(10)))];

        assert!(tracker.poll(&todos, at(5)).is_empty());
        // equal to the deadline is not yet overdue
        assert!(tracker.poll(&todos, at(10)).is_empty());
        let notices = tracker.poll(&todos, at(11));
        assert_eq!(notices, vec![OverdueNotice { id: "a".into(), text: "a".into() }]);
        assert!(tracker.poll(&todos, at(12)).is_empty());
    }

    #[test]
    fn editing_the_deadline_rearms() {
        let mut tracker = OverdueTracker::new();
        let mut todos = vec![todo("a", Some(at(10)))];
        assert_eq!(tracker.poll(&todos, at(11)).len(), 1);

        todos[0].deadline = Some(at(20));
        assert!(tracker.poll(&todos, at(15)).is_empty());
        assert_eq!(tracker.poll(&todos, at(21)).len(), 1);
    }

    #[test]
    fn completed_and_undated_todos_never_fire() {
        let mut tracker = OverdueTracker::new();
        let mut done = todo("done", Some(at(1)));
        done.completed = true;
        let todos = vec![done, todo("undated", None)];

        assert!(tracker.poll(&todos, at(100)).is_empty());
    }

    #[test]
    fn forgets_removed_todos() {
        let mut tracker = OverdueTracker::new();
        tracker.poll(&[todo("a", None), todo("b", None)], at(0));
        assert_eq!(tracker.len(), 2);

        tracker.poll(&[todo("b", None)], at(1));
        assert_eq!(tracker.len(), 1);
    }
}
