//! Main-process IPC: typed requests in, typed responses out.
//!
//! - `messages`: request/response types with trace context propagation
//! - `handler`: the [`Dispatcher`] that executes requests

pub mod handler;
pub mod messages;

pub use handler::Dispatcher;
pub use messages::{CommandResult, Envelope, Request, Response, TraceContext};
