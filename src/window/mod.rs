//! Focus-mode window management.
//!
//! - [`host`]: the [`WindowHost`] trait over native window calls
//! - [`controller`]: the Normal/Focused state machine and geometry rules
//! - [`observer`]: debounced content-height notifications
//! - [`virtual_host`]: an in-memory [`WindowHost`]

pub mod controller;
pub mod host;
pub mod observer;
pub mod virtual_host;

pub use controller::{ExitOutcome, FocusModeState, FocusWindowController, SizeUpdate};
pub use host::{WindowHost, WindowLevel};
pub use observer::{ContentHeightObserver, ResizeTicket};
pub use virtual_host::VirtualWindow;
