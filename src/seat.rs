//! Focus and seat coordination
//!
//! One logical seat aggregates every input device. The seat owns what
//! has keyboard focus (follows click/raise), what has pointer focus
//! (follows hover, tracked by the cursor machine), the active keyboard
//! designation and the current selection.

use tracing::debug;

use crate::backend::Backend;
use crate::error::log_error;
use crate::input::DeviceId;
use crate::shell::{ClientId, SelectionSource, Shell, SurfaceHandle};
use crate::state::CairnState;
use crate::view::ViewId;

bitflags::bitflags! {
    /// Input capabilities announced to clients
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SeatCapabilities: u32 {
        const POINTER = 1 << 0;
        const KEYBOARD = 1 << 1;
    }
}

/// The view and surface currently holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardFocus {
    pub view: ViewId,
    pub surface: SurfaceHandle,
}

/// The selection source currently owned by the seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub source: SelectionSource,
    pub serial: u32,
}

/// Seat-wide focus state
#[derive(Debug, Default)]
pub struct Seat {
    pub keyboard_focus: Option<KeyboardFocus>,
    /// Surface currently under the pointer, if any
    pub pointer_focus: Option<SurfaceHandle>,
    /// Last keyboard that produced input; the seat's single effective
    /// keyboard
    pub active_keyboard: Option<DeviceId>,
    pub selection: Option<Selection>,
    pub capabilities: SeatCapabilities,
}

impl Seat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Shell, B: Backend> CairnState<S, B> {
    /// Give a view keyboard focus: deactivate the previous holder, raise
    /// the target, activate it and send keyboard-enter.
    ///
    /// Refuses to act when the requested surface already holds focus, so
    /// clients never see a redundant leave/enter pair.
    pub fn focus_view(&mut self, view: Option<ViewId>, surface: Option<SurfaceHandle>) {
        let Some(view_id) = view else {
            return;
        };
        let Some(target) = self.views.get(view_id).copied() else {
            // Upstream may deliver focus requests for views destroyed
            // moments earlier
            debug!("focus request for unknown {view_id}, ignoring");
            return;
        };
        let requested = surface.unwrap_or(target.surface);
        if self.seat.keyboard_focus.map(|f| f.surface) == Some(requested) {
            return;
        }

        if let Some(prev) = self.seat.keyboard_focus {
            self.shell.set_activated(prev.surface, false);
            self.shell.keyboard_leave(prev.surface);
        }

        // Raising and focusing are separate concerns; the common path
        // composes them here
        if log_error(self.views.raise(view_id)).is_some() {
            self.scene.raise_to_top(target.node);
        }

        self.seat.keyboard_focus = Some(KeyboardFocus {
            view: view_id,
            surface: target.surface,
        });
        self.shell.set_activated(target.surface, true);

        let keyboard = self
            .seat
            .active_keyboard
            .or_else(|| self.devices.any_keyboard())
            .and_then(|d| self.devices.keyboard(d));
        if let Some(kb) = keyboard {
            let pressed = kb.pressed.clone();
            let modifiers = kb.modifiers;
            self.shell.keyboard_enter(target.surface, &pressed, modifiers);
        }
    }

    /// Drop keyboard focus, notifying the previous holder
    pub(crate) fn clear_keyboard_focus(&mut self) {
        if let Some(prev) = self.seat.keyboard_focus.take() {
            self.shell.set_activated(prev.surface, false);
            self.shell.keyboard_leave(prev.surface);
        }
    }

    /// Focus the rearmost view. No-op with fewer than two mapped views;
    /// repeated invocation walks the whole stack round-robin.
    pub fn cycle_focus(&mut self) {
        if self.views.mapped_count() < 2 {
            return;
        }
        if let Some(back) = self.views.back() {
            let surface = self.views.get(back).map(|v| v.surface);
            self.focus_view(Some(back), surface);
        }
    }

    /// Record and republish a selection source, trusting the upstream
    /// serial ordering
    pub fn set_selection(&mut self, source: SelectionSource, serial: u32) {
        self.seat.selection = Some(Selection { source, serial });
        self.shell.publish_selection(source, serial);
    }

    /// Let a client set the cursor image, but only the client whose
    /// surface holds pointer focus
    pub fn set_cursor_image(
        &mut self,
        client: ClientId,
        surface: SurfaceHandle,
        hotspot_x: i32,
        hotspot_y: i32,
    ) {
        let focused_client = self
            .seat
            .pointer_focus
            .and_then(|s| self.views.find_by_surface(s))
            .and_then(|id| self.views.get(id))
            .map(|v| v.client);
        if focused_client == Some(client) {
            self.backend.set_cursor_surface(surface, hotspot_x, hotspot_y);
        } else {
            debug!("cursor image request from unfocused client {client:?}, ignoring");
        }
    }

    /// Re-announce seat capabilities after a device change
    pub(crate) fn announce_capabilities(&mut self) {
        let caps = self.devices.capabilities();
        self.seat.capabilities = caps;
        self.shell.set_capabilities(caps);
    }
}
