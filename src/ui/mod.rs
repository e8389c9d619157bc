//! Presentation layer.
//!
//! ```text
//! AppState → compute_viewmodel(now) → PageViewModel → renderer
//! ```
//!
//! - [`viewmodel`]: display-ready page types

pub mod viewmodel;

pub use viewmodel::{PageViewModel, SortButton, TodoRow, ViewTab};
