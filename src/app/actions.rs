//! Side effects produced by the event handler.
//!
//! The handler never talks to the main process or the OS directly; it returns
//! [`Action`]s and the shell executes them in order.

use crate::ipc::Envelope;

/// Commands for the shell to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sends a request to the main process.
    ///
    /// The reply comes back as [`Event::Reply`](super::Event::Reply).
    Send(Envelope),

    /// Shows a desktop notification (and plays the alert sound) for a todo
    /// that just passed its deadline.
    NotifyOverdue {
        id: String,
        text: String,
    },
}
