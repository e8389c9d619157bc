//! Two-phase optimistic updates.
//!
//! A user command is applied locally first ([`speculative_update`]) so the
//! list reacts immediately, then the authoritative [`Response`] is folded in
//! ([`reconcile`]). A failed command does not try to undo the speculation
//! piecemeal: it asks for a full reload instead.

use crate::domain::TodoItem;
use crate::ipc::{Envelope, Response};
use chrono::{DateTime, Utc};

/// A single-todo command the page can apply optimistically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Toggle { id: String },
    Archive { id: String },
    Unarchive { id: String },
    ToggleFocus { id: String },
    Edit {
        id: String,
        text: String,
        deadline: Option<DateTime<Utc>>,
    },
    Delete { id: String },
}

impl Intent {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Toggle { id }
            | Self::Archive { id }
            | Self::Unarchive { id }
            | Self::ToggleFocus { id }
            | Self::Edit { id, .. }
            | Self::Delete { id } => id,
        }
    }

    /// The request that makes this intent authoritative.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let id = self.id().to_string();
        match self {
            Self::Toggle { .. } => Envelope::toggle_todo(id),
            Self::Archive { .. } => Envelope::archive_todo(id),
            Self::Unarchive { .. } => Envelope::unarchive_todo(id),
            Self::ToggleFocus { .. } => Envelope::toggle_focus(id),
            Self::Edit { text, deadline, .. } => Envelope::edit_todo(id, text.clone(), *deadline),
            Self::Delete { .. } => Envelope::delete_todo(id),
        }
    }
}

/// Result of folding an authoritative response into optimistic state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The list to show from now on.
    Applied(Vec<TodoItem>),
    /// The command failed; discard local state and reload everything.
    Reload { error: String },
}

/// Applies `intent` to a copy of `current`.
///
/// Unknown ids leave the list unchanged; the store will reject the command and
/// [`reconcile`] will request a reload.
#[must_use]
pub fn speculative_update(current: &[TodoItem], intent: &Intent) -> Vec<TodoItem> {
    let id = intent.id();
    if let Intent::Delete { .. } = intent {
        return current.iter().filter(|todo| todo.id != id).cloned().collect();
    }

    current
        .iter()
        .map(|todo| {
            let mut todo = todo.clone();
            if todo.id == id {
                match intent {
                    Intent::Toggle { .. } => todo.completed = !todo.completed,
                    Intent::Archive { .. } => todo.archived = true,
                    Intent::Unarchive { .. } => todo.archived = false,
                    Intent::ToggleFocus { .. } => todo.focused = !todo.focused,
                    Intent::Edit { text, deadline, .. } => {
                        todo.text = text.trim().to_string();
                        todo.deadline = *deadline;
                    }
                    Intent::Delete { .. } => {}
                }
            }
            todo
        })
        .collect()
}

/// Folds the authoritative `outcome` into `optimistic`.
///
/// - `Todo`: replaces the record with the same id, or appends it if new
/// - `Deleted`: removes the id
/// - `Todos`: replaces the whole list
/// - `Error`, failed `Window`: [`Reconciliation::Reload`]
#[must_use]
pub fn reconcile(mut optimistic: Vec<TodoItem>, outcome: &Response) -> Reconciliation {
    match outcome {
        Response::Todo { todo } => {
            match optimistic.iter_mut().find(|existing| existing.id == todo.id) {
                Some(existing) => existing.clone_from(todo),
                None => optimistic.push(todo.clone()),
            }
            Reconciliation::Applied(optimistic)
        }
        Response::Deleted { id } => {
            optimistic.retain(|todo| &todo.id != id);
            Reconciliation::Applied(optimistic)
        }
        Response::Todos { todos } => Reconciliation::Applied(todos.clone()),
        Response::Window(result) if !result.success => Reconciliation::Reload {
            error: result.error.clone().unwrap_or_else(|| "window command failed".to_string()),
        },
        Response::Window(_) => Reconciliation::Applied(optimistic),
        Response::Error { message } => Reconciliation::Reload {
            error: message.clone(),
        },
    }
}
