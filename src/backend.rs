//! Device/render backend collaborator interface
//!
//! The layer that discovers hardware, drives displays and draws the
//! cursor is external. The core issues the few commands below and
//! receives the backend's events as typed enums (see [`crate::event`]).

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::shell::SurfaceHandle;

/// Opaque handle to a display device owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct OutputHandle(pub u64);

/// A display mode picked by the backend when an output is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMode {
    pub size: Size,
    /// Refresh rate in millihertz, zero when unknown
    pub refresh_mhz: i32,
}

/// Commands issued to the device/render backend
pub trait Backend {
    /// Enable a display and configure its preferred mode.
    /// Returns `None` when the device disappeared before we got here.
    fn enable_output(&mut self, handle: OutputHandle) -> Option<OutputMode>;

    fn disable_output(&mut self, handle: OutputHandle);

    /// Show the default cursor image
    fn set_cursor_default(&mut self);

    /// Use a client surface as the cursor image
    fn set_cursor_surface(&mut self, surface: SurfaceHandle, hotspot_x: i32, hotspot_y: i32);
}
