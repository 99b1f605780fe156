//! Surface-protocol collaborator interface
//!
//! The protocol layer that negotiates buffers and window lifecycle with
//! client applications sits outside this core. Commands flow out through
//! the [`Shell`] trait; its events arrive as [`crate::event::ShellEvent`].
//! Seat-level notifications to clients (keyboard enter/leave, pointer
//! enter/motion/button/axis) go through the same seam since they are
//! delivered over the same protocol connection.

use serde::{Deserialize, Serialize};

use crate::event::{AxisOrientation, ButtonState};
use crate::geometry::{Rect, Size};
use crate::input::{KeyState, Keycode, Modifiers};
use crate::seat::SeatCapabilities;

/// Opaque handle to a client window surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SurfaceHandle(pub u64);

/// Opaque identity of a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ClientId(pub u64);

/// Opaque handle to a selection (clipboard) data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SelectionSource(pub u64);

/// Commands issued to the surface-protocol layer.
///
/// All of these are fire-and-forget: any effect that needs a client
/// round-trip (e.g. a size request) is observed later as an ordinary
/// incoming event, never awaited.
pub trait Shell {
    /// Tell a surface whether it is the activated (focused) window
    fn set_activated(&mut self, surface: SurfaceHandle, active: bool);

    /// Ask the client to commit a buffer of the given size
    fn request_size(&mut self, surface: SurfaceHandle, size: Size);

    /// The client's content geometry: its origin is the offset of the
    /// visible content from the surface origin
    fn surface_geometry(&mut self, surface: SurfaceHandle) -> Rect;

    fn keyboard_enter(
        &mut self,
        surface: SurfaceHandle,
        pressed: &[Keycode],
        modifiers: Modifiers,
    );

    fn keyboard_leave(&mut self, surface: SurfaceHandle);

    /// Forward a raw key event to the keyboard focus
    fn forward_key(&mut self, time_msec: u32, keycode: Keycode, state: KeyState);

    /// Forward the active keyboard's modifier state to the keyboard focus
    fn forward_modifiers(&mut self, modifiers: Modifiers);

    /// Pointer entered a surface, in surface-local coordinates
    fn pointer_enter(&mut self, surface: SurfaceHandle, sx: f64, sy: f64);

    /// Drop pointer focus entirely so no client receives further motion
    fn pointer_clear_focus(&mut self);

    fn pointer_motion(&mut self, time_msec: u32, sx: f64, sy: f64);

    fn pointer_button(&mut self, time_msec: u32, button: u32, state: ButtonState);

    fn pointer_axis(
        &mut self,
        time_msec: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
    );

    /// Announce the seat's aggregate input capabilities
    fn set_capabilities(&mut self, capabilities: SeatCapabilities);

    /// Republish a selection source to the seat
    fn publish_selection(&mut self, source: SelectionSource, serial: u32);
}
