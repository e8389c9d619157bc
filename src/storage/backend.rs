//! Todo store abstraction.
//!
//! The [`TodoStore`] trait is the command surface the dispatcher talks to. It
//! mirrors the operations the page issues one-to-one, so a persistent backend
//! can be swapped in without touching the view or window layers.

use crate::domain::{Result, TodoItem};
use chrono::{DateTime, Utc};

/// Authoritative owner of the todo collection.
///
/// Every mutating command returns the updated record so callers can reconcile
/// optimistic state without a full reload.
///
/// # Implementations
///
/// - [`MemoryTodoStore`](super::MemoryTodoStore): insertion-ordered `Vec`
///
/// # Examples
///
/// ```
/// use boostfocus::storage::{MemoryTodoStore, TodoStore};
///
/// let mut store = MemoryTodoStore::default();
/// let todo = store.add("  ship it ", None)?;
/// assert_eq!(todo.text, "ship it");
/// assert!(store.toggle(&todo.id)?.completed);
/// # Ok::<(), boostfocus::BoostFocusError>(())
/// ```
pub trait TodoStore: Send {
    /// All todos in insertion order, archived included.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self) -> Result<Vec<TodoItem>>;

    /// Creates a todo with trimmed text, a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::InvalidTodo`](crate::BoostFocusError::InvalidTodo)
    /// if the text is empty after trimming.
    fn add(&mut self, text: &str, deadline: Option<DateTime<Utc>>) -> Result<TodoItem>;

    /// Flips `completed`.
    ///
    /// # Errors
    ///
    /// [`BoostFocusError::TodoNotFound`](crate::BoostFocusError::TodoNotFound)
    /// for unknown ids.
    fn toggle(&mut self, id: &str) -> Result<TodoItem>;

    /// Removes a todo and returns its id.
    ///
    /// Deleting an unknown id is a no-op that still returns the id, so a
    /// repeated delete never fails.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn delete(&mut self, id: &str) -> Result<String>;

    /// # Errors
    ///
    /// `TodoNotFound` for unknown ids.
    fn archive(&mut self, id: &str) -> Result<TodoItem>;

    /// # Errors
    ///
    /// `TodoNotFound` for unknown ids.
    fn unarchive(&mut self, id: &str) -> Result<TodoItem>;

    /// Replaces text and deadline. The text is trimmed.
    ///
    /// # Errors
    ///
    /// `TodoNotFound` for unknown ids, `InvalidTodo` for empty text.
    fn edit(&mut self, id: &str, text: &str, deadline: Option<DateTime<Utc>>) -> Result<TodoItem>;

    /// Flips `focused`.
    ///
    /// # Errors
    ///
    /// `TodoNotFound` for unknown ids.
    fn toggle_focus(&mut self, id: &str) -> Result<TodoItem>;

    /// Marks a todo focused without touching any other todo.
    ///
    /// # Errors
    ///
    /// `TodoNotFound` for unknown ids.
    fn set_focus(&mut self, id: &str) -> Result<TodoItem>;

    /// Focused todos in insertion order, archived included.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn focused(&self) -> Result<Vec<TodoItem>> {
        Ok(self.list()?.into_iter().filter(|todo| todo.focused).collect())
    }
}
