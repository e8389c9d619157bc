//! Request dispatcher for the main process.
//!
//! [`Dispatcher`] owns the todo store and the focus-window controller and turns
//! every [`Request`] into exactly one [`Response`]. Failures never escape as
//! `Err`: store errors become [`Response::Error`], window errors become a
//! failed [`CommandResult`].

use crate::domain::{BoostFocusError, Result};
use crate::ipc::{CommandResult, Envelope, Request, Response};
use crate::storage::TodoStore;
use crate::window::{ExitOutcome, FocusWindowController, SizeUpdate, WindowHost};
use crate::FocusConfig;
use std::time::Instant;

/// Main-process side of the contract.
pub struct Dispatcher {
    store: Box<dyn TodoStore>,
    window: FocusWindowController<Box<dyn WindowHost>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(store: Box<dyn TodoStore>, host: Box<dyn WindowHost>, focus: FocusConfig) -> Self {
        Self {
            store,
            window: FocusWindowController::new(host, focus),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn window(&self) -> &FocusWindowController<Box<dyn WindowHost>> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut FocusWindowController<Box<dyn WindowHost>> {
        &mut self.window
    }

    /// Standardizes logging and error mapping for store commands.
    fn handle_store_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> Response
    where
        F: FnOnce(T) -> Response,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "store command succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation, error = %e, "store command failed");
                Response::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Maps a window command result onto the `{success, error?, note?}` shape.
    fn window_result<T>(operation: &str, result: Result<T>, note: impl FnOnce(&T) -> Option<&'static str>) -> Response {
        let command = match result {
            Ok(value) => match note(&value) {
                Some(note) => CommandResult::with_note(note),
                None => CommandResult::ok(),
            },
            Err(e) => {
                tracing::warn!(operation, error = %e, "window command failed");
                CommandResult::failed(e.to_string())
            }
        };
        Response::Window(command)
    }

    fn size_update_note(update: &SizeUpdate) -> Option<&'static str> {
        match update {
            SizeUpdate::Resized(_) => None,
            SizeUpdate::NotInFocusMode => Some("not in focus mode"),
        }
    }

    /// Processes one request.
    ///
    /// `now` drives the content-resize debouncer; pass the receive instant.
    pub fn handle(&mut self, envelope: Envelope, now: Instant) -> Response {
        let _context_guard = envelope.trace_context.as_ref().and_then(|ctx| ctx.attach());
        let _span = tracing::debug_span!("dispatch", request = envelope.request.name()).entered();

        let store = &mut self.store;
        match envelope.request {
            Request::GetTodos => {
                Self::handle_store_result("get todos", store.list(), |todos| Response::Todos { todos })
            }
            Request::AddTodo { text, deadline } => {
                Self::handle_store_result("add todo", store.add(&text, deadline), |todo| Response::Todo { todo })
            }
            Request::ToggleTodo { id } => {
                Self::handle_store_result("toggle todo", store.toggle(&id), |todo| Response::Todo { todo })
            }
            Request::DeleteTodo { id } => {
                Self::handle_store_result("delete todo", store.delete(&id), |id| Response::Deleted { id })
            }
            Request::ArchiveTodo { id } => {
                Self::handle_store_result("archive todo", store.archive(&id), |todo| Response::Todo { todo })
            }
            Request::UnarchiveTodo { id } => {
                Self::handle_store_result("unarchive todo", store.unarchive(&id), |todo| Response::Todo { todo })
            }
            Request::ToggleFocus { id } => {
                Self::handle_store_result("toggle focus", store.toggle_focus(&id), |todo| Response::Todo { todo })
            }
            Request::SetFocus { id } => {
                Self::handle_store_result("set focus", store.set_focus(&id), |todo| Response::Todo { todo })
            }
            Request::GetFocusedTodos => {
                Self::handle_store_result("get focused todos", store.focused(), |todos| Response::Todos { todos })
            }
            Request::EditTodo { id, text, deadline } => Self::handle_store_result(
                "edit todo",
                store.edit(&id, &text, deadline),
                |todo| Response::Todo { todo },
            ),
            Request::EnterFocusMode { content_height } => {
                Self::window_result("enter focus mode", self.window.enter(content_height), |_| None)
            }
            Request::ExitFocusMode => Self::window_result("exit focus mode", self.window.exit(), |outcome| {
                match outcome {
                    ExitOutcome::Restored(_) => None,
                    ExitOutcome::Fallback => Some("no saved geometry, restored default size"),
                }
            }),
            Request::UpdateFocusModeSize { content_height } => Self::window_result(
                "update focus mode size",
                self.window.update_size(content_height),
                Self::size_update_note,
            ),
            Request::ContentResized { height } => {
                let note = if self.window.content_resized(height, now).is_some() {
                    "resize scheduled"
                } else {
                    "not in focus mode"
                };
                Response::Window(CommandResult::with_note(note))
            }
        }
    }

    /// Decodes a JSON envelope, handles it and encodes the response.
    ///
    /// Malformed input yields an encoded [`Response::Error`].
    ///
    /// # Errors
    ///
    /// Returns [`BoostFocusError::Protocol`] only if the response itself
    /// cannot be encoded.
    pub fn handle_json(&mut self, line: &str, now: Instant) -> Result<String> {
        let response = match serde_json::from_str::<Envelope>(line) {
            Ok(envelope) => self.handle(envelope, now),
            Err(e) => {
                tracing::debug!(error = %e, "failed to decode request");
                Response::Error {
                    message: format!("invalid request: {e}"),
                }
            }
        };
        Self::encode(&response)
    }

    /// [`handle_json`](Self::handle_json) for a raw input line.
    ///
    /// Bytes that are not UTF-8 yield an encoded [`Response::Error`], like any
    /// other malformed request.
    ///
    /// # Errors
    ///
    /// Same as [`handle_json`](Self::handle_json).
    pub fn handle_bytes(&mut self, line: &[u8], now: Instant) -> Result<String> {
        match std::str::from_utf8(line) {
            Ok(text) => self.handle_json(text, now),
            Err(e) => {
                tracing::debug!(error = %e, "request is not valid UTF-8");
                Self::encode(&Response::Error {
                    message: format!("invalid request: {e}"),
                })
            }
        }
    }

    fn encode(response: &Response) -> Result<String> {
        serde_json::to_string(response).map_err(|e| BoostFocusError::Protocol(e.to_string()))
    }

    /// Applies a settled content-resize, if one is due.
    ///
    /// Returns the resulting window response so the caller can forward it.
    pub fn tick(&mut self, now: Instant) -> Option<Response> {
        let result = self.window.flush_resize(now)?;
        Some(Self::window_result("debounced resize", result, Self::size_update_note))
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.window.next_resize_due()
    }
}
