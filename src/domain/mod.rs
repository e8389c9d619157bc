//! Domain layer for Boost Focus.
//!
//! Core value types, independent of any window toolkit or storage backend.
//!
//! - [`error`]: Error types and result alias
//! - [`todo`]: The todo item model
//! - [`geometry`]: Window geometry and work-area rectangles

pub mod error;
pub mod geometry;
pub mod todo;

pub use error::{BoostFocusError, Result};
pub use geometry::{WindowGeometry, WorkArea};
pub use todo::TodoItem;
