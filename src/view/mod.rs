//! View derivation: the pure core that turns a todo snapshot into what the page shows.
//!
//! # Modules
//!
//! - [`deadline`]: countdown labels and overdue detection
//! - [`sort`]: ordering by deadline, creation time, text or completion
//! - [`filter`]: active/archived/all selection and focus partitioning
//! - [`engine`]: composition of the above into the displayed list
//!
//! Nothing in this module performs I/O or keeps hidden state.

pub mod deadline;
pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::{derive, stats, ViewQuery, ViewStats};
pub use filter::{partition_by_focus, select, ViewOption};
pub use sort::{compare, sort_todos, SortKey};
