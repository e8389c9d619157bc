//! Error types for the Boost Focus core.
//!
//! This module defines the centralized error type [`BoostFocusError`] and a type
//! alias [`Result`] used throughout the crate. Errors are implemented with the
//! `thiserror` crate.
//!
//! Two conditions that the window layer reports are deliberately *not* errors:
//! resizing while not in focus mode and restoring without a captured geometry.
//! Those surface as [`SizeUpdate::NotInFocusMode`](crate::window::SizeUpdate)
//! and [`ExitOutcome::Fallback`](crate::window::ExitOutcome).

use thiserror::Error;

/// The main error type for Boost Focus operations.
///
/// # Examples
///
/// ```
/// use boostfocus::BoostFocusError;
///
/// fn lookup(id: &str) -> Result<(), BoostFocusError> {
///     Err(BoostFocusError::TodoNotFound(id.to_string()))
/// }
///
/// assert_eq!(lookup("42").unwrap_err().to_string(), "Todo not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum BoostFocusError {
    /// The window host has no live window handle.
    ///
    /// Surfaced to the caller without retry. The focus controller refuses to
    /// enter focus mode in this state.
    #[error("Window unavailable: no active window handle")]
    WindowUnavailable,

    /// A window host call failed after the window was known to exist.
    ///
    /// Typically the window was destroyed concurrently.
    #[error("Window host error: {0}")]
    WindowHost(String),

    /// No todo with the given id exists in the store.
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    /// A todo command was rejected, e.g. empty text after trimming.
    #[error("Invalid todo: {0}")]
    InvalidTodo(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request or response could not be decoded or encoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Boost Focus operations.
pub type Result<T> = std::result::Result<T, BoostFocusError>;
