//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. Each call returns a
//! render flag plus the [`Action`]s the shell must execute:
//!
//! ```text
//! user input / replies / clock → Event → handle_event → (render?, actions)
//!                                   ↑                        │
//!                                   └──── Reply(Response) ◀──┘ Send(Envelope)
//! ```

use super::optimistic::{reconcile, speculative_update, Intent, Reconciliation};
use crate::app::{Action, AppState};
use crate::domain::Result;
use crate::ipc::{Envelope, Response};
use crate::view::{SortKey, ViewOption};
use chrono::{DateTime, Utc};

/// Everything that can happen to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Requests the initial snapshot.
    Load,

    /// A reply from the main process.
    Reply(Response),

    AddTodo {
        text: String,
        deadline: Option<DateTime<Utc>>,
    },
    ToggleTodo {
        id: String,
    },
    DeleteTodo {
        id: String,
    },
    ArchiveTodo {
        id: String,
    },
    UnarchiveTodo {
        id: String,
    },
    ToggleFocus {
        id: String,
    },
    EditTodo {
        id: String,
        text: String,
        deadline: Option<DateTime<Utc>>,
    },

    SortChange(SortKey),
    ViewChange(ViewOption),

    /// Focus-mode button. `content_height` is the measured list height.
    ToggleFocusMode {
        content_height: f64,
    },

    /// The focused list re-rendered at a new height.
    ContentResized {
        height: f64,
    },

    /// Once-per-second clock.
    Tick(DateTime<Utc>),

    /// The user closed the inline error.
    DismissError,
}

/// Processes an event, mutates state and returns `(render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for handlers
/// that need to fail.
///
/// # Example
///
/// ```rust
/// use boostfocus::app::{handle_event, Action, AppState, Event};
/// use boostfocus::view::SortKey;
///
/// let mut state = AppState::default();
/// let (render, actions) = handle_event(&mut state, &Event::SortChange(SortKey::Text))?;
/// assert!(render && actions.is_empty());
///
/// let (_, actions) = handle_event(&mut state, &Event::Load)?;
/// assert!(matches!(actions[0], Action::Send(_)));
/// # Ok::<(), boostfocus::BoostFocusError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Load => {
            state.loading = true;
            Ok((true, vec![Action::Send(Envelope::get_todos())]))
        }
        Event::Reply(response) => Ok(handle_reply(state, response)),
        Event::AddTodo { text, deadline } => {
            let text = text.trim();
            if text.is_empty() {
                tracing::debug!("ignoring empty todo");
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::Send(Envelope::add_todo(text.to_string(), *deadline))]))
        }
        Event::ToggleTodo { id } => Ok(apply_intent(state, Intent::Toggle { id: id.clone() })),
        Event::DeleteTodo { id } => Ok(apply_intent(state, Intent::Delete { id: id.clone() })),
        Event::ArchiveTodo { id } => Ok(apply_intent(state, Intent::Archive { id: id.clone() })),
        Event::UnarchiveTodo { id } => Ok(apply_intent(state, Intent::Unarchive { id: id.clone() })),
        Event::ToggleFocus { id } => Ok(apply_intent(state, Intent::ToggleFocus { id: id.clone() })),
        Event::EditTodo { id, text, deadline } => {
            if text.trim().is_empty() {
                tracing::debug!(id = %id, "ignoring edit with empty text");
                return Ok((false, vec![]));
            }
            Ok(apply_intent(
                state,
                Intent::Edit {
                    id: id.clone(),
                    text: text.clone(),
                    deadline: *deadline,
                },
            ))
        }
        Event::SortChange(key) => {
            state.change_sort(*key);
            Ok((true, vec![]))
        }
        Event::ViewChange(view) => {
            if state.query.view == *view {
                return Ok((false, vec![]));
            }
            state.query.view = *view;
            Ok((true, vec![]))
        }
        Event::ToggleFocusMode { content_height } => {
            state.query.focus_mode = !state.query.focus_mode;
            let request = if state.query.focus_mode {
                tracing::debug!(content_height, "entering focus mode");
                Envelope::enter_focus_mode(*content_height)
            } else {
                tracing::debug!("leaving focus mode");
                Envelope::exit_focus_mode()
            };
            Ok((true, vec![Action::Send(request)]))
        }
        Event::ContentResized { height } => {
            if !state.query.focus_mode {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::Send(Envelope::content_resized(*height))]))
        }
        Event::Tick(now) => {
            let actions: Vec<Action> = state
                .overdue
                .poll(&state.todos, *now)
                .into_iter()
                .map(|notice| Action::NotifyOverdue {
                    id: notice.id,
                    text: notice.text,
                })
                .collect();
            Ok((true, actions))
        }
        Event::DismissError => Ok((state.error.take().is_some(), vec![])),
    }
}

fn apply_intent(state: &mut AppState, intent: Intent) -> (bool, Vec<Action>) {
    state.todos = speculative_update(&state.todos, &intent);
    (true, vec![Action::Send(intent.envelope())])
}

fn handle_reply(state: &mut AppState, response: &Response) -> (bool, Vec<Action>) {
    if let Response::Window(result) = response {
        if result.success {
            return (false, vec![]);
        }
        tracing::warn!(error = ?result.error, "window command failed");
        state.error.clone_from(&result.error);
        return (true, vec![]);
    }

    // snapshots keep the inline error; a later command success or a dismiss clears it
    if let Response::Todos { todos } = response {
        if !state.loading && &state.todos == todos {
            tracing::debug!("todos unchanged, skipping render");
            return (false, vec![]);
        }
        state.loading = false;
    }

    let command_succeeded = matches!(response, Response::Todo { .. } | Response::Deleted { .. });
    let reload_pending = state.loading;

    match reconcile(std::mem::take(&mut state.todos), response) {
        Reconciliation::Applied(todos) => {
            state.todos = todos;
            if command_succeeded {
                state.error = None;
            }
            (true, vec![])
        }
        Reconciliation::Reload { error } if reload_pending => {
            tracing::warn!(error = %error, "reload failed");
            state.error = Some(error);
            state.loading = false;
            (true, vec![])
        }
        Reconciliation::Reload { error } => {
            tracing::debug!(error = %error, "command failed, reloading todos");
            state.error = Some(error);
            state.loading = true;
            (true, vec![Action::Send(Envelope::get_todos())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoItem;
    use crate::ipc::{CommandResult, Request};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn todo(id: &str) -> TodoItem {
        let mut item = TodoItem::new(id, None, now());
        item.id = id.to_string();
        item
    }

    fn sent(actions: &[Action]) -> Vec<Request> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Send(envelope) => Some(envelope.request.clone()),
                Action::NotifyOverdue { .. } => None,
            })
            .collect()
    }

    #[test]
    fn failed_reply_keeps_state_consistent_by_reloading() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Reply(Response::Todos { todos: vec![todo("a")] })).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ToggleTodo { id: "a".into() }).unwrap();
        assert!(state.todos[0].completed);
        assert_eq!(sent(&actions), [Request::ToggleTodo { id: "a".into() }]);

        let failure = Response::Error { message: "toggle todo: boom".into() };
        let (_, actions) = handle_event(&mut state, &Event::Reply(failure)).unwrap();
        assert_eq!(sent(&actions), [Request::GetTodos]);
        assert_eq!(state.error.as_deref(), Some("toggle todo: boom"));

        handle_event(&mut state, &Event::Reply(Response::Todos { todos: vec![todo("a")] })).unwrap();
        assert!(!state.todos[0].completed);
        assert!(!state.loading);
        assert_eq!(state.compute_viewmodel(now()).error.as_deref(), Some("toggle todo: boom"));

        // the next command that succeeds clears it
        handle_event(&mut state, &Event::ToggleTodo { id: "a".into() }).unwrap();
        assert!(state.error.is_some());
        let mut done = todo("a");
        done.completed = true;
        handle_event(&mut state, &Event::Reply(Response::Todo { todo: done })).unwrap();
        assert_eq!(state.error, None);
        assert!(state.todos[0].completed);
    }

    #[test]
    fn inline_error_can_be_dismissed() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Reply(Response::Todos { todos: vec![todo("a")] })).unwrap();
        handle_event(&mut state, &Event::Reply(Response::Error { message: "archive todo: boom".into() })).unwrap();

        let (render, _) = handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(render);
        assert_eq!(state.error, None);

        let (render, _) = handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(!render);
    }

    #[test]
    fn failed_reload_is_not_retried() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Reply(Response::Todos { todos: vec![todo("a")] })).unwrap();

        let (_, actions) =
            handle_event(&mut state, &Event::Reply(Response::Error { message: "toggle todo: boom".into() })).unwrap();
        assert_eq!(sent(&actions), [Request::GetTodos]);

        let (_, actions) =
            handle_event(&mut state, &Event::Reply(Response::Error { message: "get todos: gone".into() })).unwrap();
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("get todos: gone"));
    }

    #[test]
    fn blank_add_is_ignored() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(
            &mut state,
            &Event::AddTodo { text: "   ".into(), deadline: None },
        )
        .unwrap();
        assert!(!render && actions.is_empty());
    }

    #[test]
    fn focus_mode_toggle_round_trips() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::ToggleFocusMode { content_height: 120.0 }).unwrap();
        assert!(state.query.focus_mode);
        assert_eq!(sent(&actions), [Request::EnterFocusMode { content_height: 120.0 }]);

        let (_, actions) = handle_event(&mut state, &Event::ContentResized { height: 80.0 }).unwrap();
        assert_eq!(sent(&actions), [Request::ContentResized { height: 80.0 }]);

        let (_, actions) = handle_event(&mut state, &Event::ToggleFocusMode { content_height: 80.0 }).unwrap();
        assert!(!state.query.focus_mode);
        assert_eq!(sent(&actions), [Request::ExitFocusMode]);

        let (_, actions) = handle_event(&mut state, &Event::ContentResized { height: 80.0 }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn window_failure_surfaces_inline() {
        let mut state = AppState::default();
        let reply = Response::Window(CommandResult::failed("Window unavailable: no active window handle"));
        let (render, actions) = handle_event(&mut state, &Event::Reply(reply)).unwrap();
        assert!(render && actions.is_empty());
        assert!(state.error.is_some());
    }

    #[test]
    fn tick_notifies_each_crossing_once() {
        let mut state = AppState::default();
        let mut due = todo("a");
        due.deadline = Some(now());
        state.todos = vec![due];

        let later = now() + chrono::Duration::seconds(1);
        let (_, actions) = handle_event(&mut state, &Event::Tick(later)).unwrap();
        assert_eq!(actions, vec![Action::NotifyOverdue { id: "a".into(), text: "a".into() }]);

        let (_, actions) = handle_event(&mut state, &Event::Tick(later)).unwrap();
        assert!(actions.is_empty());
    }
}
