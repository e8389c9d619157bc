//! Request/response contract between the page and the main process.
//!
//! Requests travel inside an [`Envelope`] that also carries the caller's
//! tracing context, so spans recorded while handling a request link back to
//! the span that issued it.
//!
//! # Wire Format
//!
//! JSON, one object per message, tagged by `type`. The request fields are
//! flattened into the envelope:
//!
//! ```json
//! {"type": "addTodo", "text": "Write report", "deadline": "2030-01-01T09:00:00Z"}
//! {"type": "enterFocusMode", "contentHeight": 240.0}
//! ```

use crate::domain::TodoItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity between the sender of a request and its handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is always
    /// the case when no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created on this thread.
    ///
    /// The returned guard must be held for the duration of the handling.
    /// Returns `None` when the IDs are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Commands the page can issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    GetTodos,
    AddTodo {
        text: String,
        #[serde(default)]
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
    SetFocus {
        id: String,
    },
    GetFocusedTodos,
    EditTodo {
        id: String,
        text: String,
        #[serde(default)]
        deadline: Option<DateTime<Utc>>,
    },
    /// `content_height` is the measured height of the focused list.
    EnterFocusMode {
        content_height: f64,
    },
    ExitFocusMode,
    UpdateFocusModeSize {
        content_height: f64,
    },
    /// Raw measurement from the content observer; debounced before use.
    ContentResized {
        height: f64,
    },
}

impl Request {
    /// Short name used in span fields and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetTodos => "get todos",
            Self::AddTodo { .. } => "add todo",
            Self::ToggleTodo { .. } => "toggle todo",
            Self::DeleteTodo { .. } => "delete todo",
            Self::ArchiveTodo { .. } => "archive todo",
            Self::UnarchiveTodo { .. } => "unarchive todo",
            Self::ToggleFocus { .. } => "toggle focus",
            Self::SetFocus { .. } => "set focus",
            Self::GetFocusedTodos => "get focused todos",
            Self::EditTodo { .. } => "edit todo",
            Self::EnterFocusMode { .. } => "enter focus mode",
            Self::ExitFocusMode => "exit focus mode",
            Self::UpdateFocusModeSize { .. } => "update focus mode size",
            Self::ContentResized { .. } => "content resized",
        }
    }
}

/// A [`Request`] plus the tracing context of whoever sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(flatten)]
    pub request: Request,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl Envelope {
    /// Wraps a request, capturing the current trace context.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            trace_context: TraceContext::from_current(),
        }
    }
}

/// Generates one `Envelope` constructor per `Request` variant.
macro_rules! envelope_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl Envelope {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " envelope with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::new(Request::$variant { $($field),* })
                }
            )*
        }
    };
}

envelope_builders! {
    get_todos(GetTodos {}),
    add_todo(AddTodo { text: String, deadline: Option<DateTime<Utc>> }),
    toggle_todo(ToggleTodo { id: String }),
    delete_todo(DeleteTodo { id: String }),
    archive_todo(ArchiveTodo { id: String }),
    unarchive_todo(UnarchiveTodo { id: String }),
    toggle_focus(ToggleFocus { id: String }),
    set_focus(SetFocus { id: String }),
    get_focused_todos(GetFocusedTodos {}),
    edit_todo(EditTodo { id: String, text: String, deadline: Option<DateTime<Utc>> }),
    enter_focus_mode(EnterFocusMode { content_height: f64 }),
    exit_focus_mode(ExitFocusMode {}),
    update_focus_mode_size(UpdateFocusModeSize { content_height: f64 }),
    content_resized(ContentResized { height: f64 }),
}

/// Outcome of a window command, as reported to the page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Informational detail on a successful command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CommandResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_note(note: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            note: Some(note.into()),
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            note: None,
        }
    }
}

/// Replies from the main process. Every request yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    /// Full or focused list, in insertion order.
    Todos { todos: Vec<TodoItem> },

    /// The record affected by a single-todo command.
    Todo { todo: TodoItem },

    Deleted { id: String },

    Window(CommandResult),

    Error { message: String },
}

impl Response {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Error { .. } | Self::Window(CommandResult { success: false, .. })
        )
    }
}
