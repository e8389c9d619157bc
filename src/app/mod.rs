//! Application layer: page state, events and side effects.
//!
//! ```text
//! Event → handle_event → state mutation → (render?, Vec<Action>)
//!   ↑                                              │
//!   └────────────── Reply(Response) ◀──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects for the shell to execute
//! - [`handler`]: event processing
//! - [`optimistic`]: speculative updates and reconciliation
//! - [`overdue`]: once-per-crossing overdue notifications
//! - [`state`]: [`AppState`] and view model computation

pub mod actions;
pub mod handler;
pub mod optimistic;
pub mod overdue;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use optimistic::{reconcile, speculative_update, Intent, Reconciliation};
pub use overdue::{OverdueNotice, OverdueTracker};
pub use state::AppState;
