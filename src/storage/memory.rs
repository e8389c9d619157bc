//! In-memory todo store.

use crate::domain::{BoostFocusError, Result, TodoItem};
use crate::storage::backend::TodoStore;
use chrono::{DateTime, Utc};

/// Keeps todos in a `Vec` for the lifetime of the process.
///
/// Backs the headless shell and tests. Lookups are linear, which is fine at
/// the size of a personal todo list.
#[derive(Debug, Clone, Default)]
pub struct MemoryTodoStore {
    todos: Vec<TodoItem>,
}

impl MemoryTodoStore {
    /// Creates a store pre-populated with `todos`.
    #[must_use]
    pub const fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self { todos }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut TodoItem> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| BoostFocusError::TodoNotFound(id.to_string()))
    }

    fn update(&mut self, id: &str, apply: impl FnOnce(&mut TodoItem)) -> Result<TodoItem> {
        let todo = self.find_mut(id)?;
        apply(todo);
        Ok(todo.clone())
    }
}

fn validated_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BoostFocusError::InvalidTodo("text must not be empty".to_string()));
    }
    Ok(trimmed)
}

impl TodoStore for MemoryTodoStore {
    fn list(&self) -> Result<Vec<TodoItem>> {
        Ok(self.todos.clone())
    }

    fn add(&mut self, text: &str, deadline: Option<DateTime<Utc>>) -> Result<TodoItem> {
        let text = validated_text(text)?;
        let todo = TodoItem::new(text, deadline, Utc::now());
        tracing::debug!(id = %todo.id, "todo added");
        self.todos.push(todo.clone());
        Ok(todo)
    }

    fn toggle(&mut self, id: &str) -> Result<TodoItem> {
        self.update(id, |todo| todo.completed = !todo.completed)
    }

    fn delete(&mut self, id: &str) -> Result<String> {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() == before {
            tracing::debug!(id, "delete of unknown todo, nothing to do");
        } else {
            tracing::debug!(id, "todo deleted");
        }
        Ok(id.to_string())
    }

    fn archive(&mut self, id: &str) -> Result<TodoItem> {
        self.update(id, |todo| todo.archived = true)
    }

    fn unarchive(&mut self, id: &str) -> Result<TodoItem> {
        self.update(id, |todo| todo.archived = false)
    }

    fn edit(&mut self, id: &str, text: &str, deadline: Option<DateTime<Utc>>) -> Result<TodoItem> {
        let text = validated_text(text)?.to_string();
        self.update(id, move |todo| {
            todo.text = text;
            todo.deadline = deadline;
        })
    }

    fn toggle_focus(&mut self, id: &str) -> Result<TodoItem> {
        self.update(id, |todo| todo.focused = !todo.focused)
    }

    fn set_focus(&mut self, id: &str) -> Result<TodoItem> {
        self.update(id, |todo| todo.focused = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_blank_text() {
        let mut store = MemoryTodoStore::default();
        assert!(matches!(store.add("   ", None), Err(BoostFocusError::InvalidTodo(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = MemoryTodoStore::default();
        assert!(matches!(store.toggle("nope"), Err(BoostFocusError::TodoNotFound(id)) if id == "nope"));
        assert!(matches!(store.archive("nope"), Err(BoostFocusError::TodoNotFound(_))));
    }

    #[test]
    fn repeated_delete_is_idempotent() {
        let now = Utc::now();
        let mut kept = TodoItem::new("kept", None, now);
        kept.id = "kept".to_string();
        let mut gone = TodoItem::new("gone", None, now);
        gone.id = "gone".to_string();
        let mut store = MemoryTodoStore::with_todos(vec![kept, gone]);

        assert_eq!(store.delete("gone").unwrap(), "gone");
        assert_eq!(store.delete("gone").unwrap(), "gone");
        assert_eq!(store.delete("never-existed").unwrap(), "never-existed");

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["kept"]);
    }

    #[test]
    fn set_focus_leaves_other_todos_alone() {
        let mut store = MemoryTodoStore::default();
        let a = store.add("a", None).unwrap();
        let b = store.add("b", None).unwrap();
        store.set_focus(&a.id).unwrap();
        store.set_focus(&b.id).unwrap();

        let focused: Vec<String> = store.focused().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(focused, [a.id, b.id]);
    }

    #[test]
    fn edit_trims_and_replaces_deadline() {
        let mut store = MemoryTodoStore::default();
        let deadline = "2030-01-01T00:00:00Z".parse().unwrap();
        let todo = store.add("draft", Some(deadline)).unwrap();

        let edited = store.edit(&todo.id, "  final ", None).unwrap();
        assert_eq!(edited.text, "final");
        assert_eq!(edited.deadline, None);
        assert!(matches!(store.edit(&todo.id, "", None), Err(BoostFocusError::InvalidTodo(_))));
    }

    #[test]
    fn delete_returns_id_and_preserves_order() {
        let mut store = MemoryTodoStore::default();
        let a = store.add("a", None).unwrap();
        let b = store.add("b", None).unwrap();
        let c = store.add("c", None).unwrap();

        assert_eq!(store.delete(&b.id).unwrap(), b.id);
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, [a.id, c.id]);
    }
}
