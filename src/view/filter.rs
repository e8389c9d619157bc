//! View selection and focus partitioning.

use crate::domain::TodoItem;
use serde::{Deserialize, Serialize};

/// Which slice of the todo list the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewOption {
    /// Everything not archived.
    #[default]
    Active,
    Archived,
    All,
}

impl ViewOption {
    pub const ALL: [Self; 3] = [Self::Active, Self::Archived, Self::All];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    #[must_use]
    pub const fn admits(self, todo: &TodoItem) -> bool {
        match self {
            Self::Active => !todo.archived,
            Self::Archived => todo.archived,
            Self::All => true,
        }
    }
}

/// Keeps the todos admitted by `view`, preserving their relative order.
#[must_use]
pub fn select(todos: &[TodoItem], view: ViewOption) -> Vec<&TodoItem> {
    todos.iter().filter(|todo| view.admits(todo)).collect()
}

/// Stable partition into `(focused, not_focused)`.
#[must_use]
pub fn partition_by_focus<'a, I>(todos: I) -> (Vec<&'a TodoItem>, Vec<&'a TodoItem>)
where
    I: IntoIterator<Item = &'a TodoItem>,
{
    todos.into_iter().partition(|todo| todo.focused)
}
