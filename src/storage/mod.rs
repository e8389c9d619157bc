//! Todo storage layer.
//!
//! - `backend`: the [`TodoStore`] command trait
//! - `memory`: [`MemoryTodoStore`], a process-lifetime implementation

pub mod backend;
pub mod memory;

pub use backend::TodoStore;
pub use memory::MemoryTodoStore;
