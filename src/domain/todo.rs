//! Todo domain model.
//!
//! A [`TodoItem`] is created by the store and handed to the view engine by value
//! (as a snapshot) on every query. The core never owns persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo entry.
///
/// Field names serialize in camelCase (`createdAt`) to match the payloads the
/// renderer process exchanges with the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Non-empty, trimmed description.
    pub text: String,
    pub completed: bool,
    /// Archived items are excluded from the active view and from focus mode.
    pub archived: bool,
    /// Focused items are pinned above the rest and make up focus mode.
    pub focused: bool,
    pub created_at: DateTime<Utc>,
    /// Optional due instant. `None` means "no deadline".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a new todo with a fresh UUID and all flags cleared.
    ///
    /// The text is trimmed. Rejecting empty text is the store's job, see
    /// [`crate::storage::TodoStore::add`].
    ///
    /// # Examples
    ///
    /// ```
    /// use boostfocus::TodoItem;
    ///
    /// let now = chrono::Utc::now();
    /// let todo = TodoItem::new("  write report ", None, now);
    /// assert_eq!(todo.text, "write report");
    /// assert!(!todo.completed && !todo.archived && !todo.focused);
    /// ```
    #[must_use]
    pub fn new(text: &str, deadline: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            completed: false,
            archived: false,
            focused: false,
            created_at,
            deadline,
        }
    }

    /// Returns `true` when the todo has a deadline in the past and is not completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        crate::view::deadline::is_overdue(self.deadline, now, self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_todos_get_distinct_ids() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let a = TodoItem::new("a", None, now);
        let b = TodoItem::new("a", None, now);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, now);
    }

    #[test]
    fn serializes_with_camel_case_and_omits_missing_deadline() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let mut todo = TodoItem::new("pay rent", None, now);
        todo.id = "t1".to_string();

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["createdAt"], "2030-01-01T00:00:00Z");
        assert!(json.get("deadline").is_none());

        let back: TodoItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, todo);
    }
}
