//! Typed events consumed by the core
//!
//! The collaborators deliver one event at a time; each kind is a variant
//! of one enum per collaborator and is dispatched by a single function in
//! [`crate::state`]. Ordering is whatever the event loop dequeues,
//! processed to completion before the next event.

use crate::backend::OutputHandle;
use crate::geometry::ResizeEdges;
use crate::input::{DeviceId, KeyState, Keycode, Keymap, Modifiers};
use crate::shell::{ClientId, SelectionSource, SurfaceHandle};

/// Pressed/released state of a pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Scroll axis orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

/// What a newly discovered device can do, decided once at add time
pub enum DeviceCapability {
    Keyboard {
        /// Compiled by the backend; this core never compiles keymaps
        keymap: Box<dyn Keymap>,
    },
    Pointer,
}

/// Events from the device backend
pub enum InputEvent {
    DeviceAdded {
        device: DeviceId,
        capability: DeviceCapability,
    },
    DeviceRemoved {
        device: DeviceId,
    },
    /// Relative pointer motion (a delta)
    PointerMotion {
        delta_x: f64,
        delta_y: f64,
        time_msec: u32,
    },
    /// Absolute pointer motion, normalized to 0..1 on each axis
    PointerMotionAbsolute {
        x: f64,
        y: f64,
        time_msec: u32,
    },
    PointerButton {
        button: u32,
        state: ButtonState,
        time_msec: u32,
    },
    PointerAxis {
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        time_msec: u32,
    },
    KeyboardKey {
        device: DeviceId,
        keycode: Keycode,
        state: KeyState,
        time_msec: u32,
    },
    KeyboardModifiers {
        device: DeviceId,
        modifiers: Modifiers,
    },
}

/// Display hotplug events from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Added { handle: OutputHandle },
    Removed { handle: OutputHandle },
}

/// Events from the surface-protocol layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// A client window finished its initial commit and wants to be mapped
    SurfaceReadyToMap {
        surface: SurfaceHandle,
        client: ClientId,
    },
    SurfaceUnmapped {
        surface: SurfaceHandle,
    },
    SurfaceDestroyed {
        surface: SurfaceHandle,
    },
    /// Client committed a buffer; its geometry may have changed
    SurfaceCommitted {
        surface: SurfaceHandle,
    },
    /// Client asked for an interactive move
    RequestMove {
        surface: SurfaceHandle,
    },
    /// Client asked for an interactive resize on the given edges
    RequestResize {
        surface: SurfaceHandle,
        edges: ResizeEdges,
    },
    RequestMaximize {
        surface: SurfaceHandle,
    },
    RequestFullscreen {
        surface: SurfaceHandle,
    },
    /// Client wants to own the selection
    SetSelection {
        source: SelectionSource,
        serial: u32,
    },
    /// Client offered a surface as the cursor image
    SetCursorImage {
        client: ClientId,
        surface: SurfaceHandle,
        hotspot_x: i32,
        hotspot_y: i32,
    },
}
