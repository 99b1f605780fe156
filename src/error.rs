//! Error types for cairn
//!
//! Malformed device state and stale-object events are absorbed where they
//! are detected: the registry operations below return errors so the call
//! site can log and continue, never propagate. Allocation failure has no
//! recovery path in this core and aborts the process.

use std::fmt;

use crate::input::DeviceId;
use crate::output::OutputId;
use crate::shell::SurfaceHandle;
use crate::view::ViewId;

/// Main error type for cairn operations
#[derive(Debug, thiserror::Error)]
pub enum CairnError {
    /// View not found in registry
    #[error("View {0} not found")]
    ViewNotFound(ViewId),

    /// Surface has no associated view
    #[error("Surface {0:?} has no associated view")]
    SurfaceNotMapped(SurfaceHandle),

    /// Event from a device the registry never saw
    #[error("Unknown device {0:?}")]
    UnknownDevice(DeviceId),

    /// Output not found in the layout
    #[error("Output {0} not found")]
    OutputNotFound(OutputId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown key name in a keybinding
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cairn operations
pub type CairnResult<T> = Result<T, CairnError>;

/// Helper for operations that should log errors but not propagate them
pub fn log_error<T, E: fmt::Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(val) => Some(val),
        Err(err) => {
            tracing::warn!("Operation failed: {err}");
            None
        }
    }
}
