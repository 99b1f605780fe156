//! Pointer input and the cursor interaction state machine
//!
//! The cursor is always in exactly one of three modes: passthrough
//! (events go to whatever is under it), moving, or resizing. Mode entry
//! happens via a client-requested interactive move/resize; any button
//! release drops back to passthrough unconditionally, so a grab can
//! never outlive the button that started it.

use tracing::debug;

use crate::backend::Backend;
use crate::event::{AxisOrientation, ButtonState};
use crate::geometry::{Point, Rect, ResizeEdges, Size};
use crate::shell::{Shell, SurfaceHandle};
use crate::state::CairnState;
use crate::view::ViewId;

/// Pointer offset and window geometry captured when a grab starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabStart {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Content geometry in global coordinates at grab time; unused for
    /// moves
    pub geometry: Rect,
}

/// Current cursor interaction mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMode {
    Passthrough,
    Moving {
        view: ViewId,
        grab: GrabStart,
    },
    Resizing {
        view: ViewId,
        grab: GrabStart,
        edges: ResizeEdges,
    },
}

/// Pointer position and interaction mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    pub mode: PointerMode,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            mode: PointerMode::Passthrough,
        }
    }

    /// The view captured by an active grab, if any
    pub fn grabbed_view(&self) -> Option<ViewId> {
        match self.mode {
            PointerMode::Passthrough => None,
            PointerMode::Moving { view, .. } | PointerMode::Resizing { view, .. } => Some(view),
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Shell, B: Backend> CairnState<S, B> {
    /// Relative pointer motion (a delta)
    pub fn on_pointer_motion(&mut self, delta_x: f64, delta_y: f64, time_msec: u32) {
        self.cursor.x += delta_x;
        self.cursor.y += delta_y;
        self.process_cursor_motion(time_msec);
    }

    /// Absolute pointer motion, normalized 0..1 over the output layout
    pub fn on_pointer_motion_absolute(&mut self, x: f64, y: f64, time_msec: u32) {
        let (gx, gy) = self.outputs.map_absolute(x, y);
        self.cursor.x = gx;
        self.cursor.y = gy;
        self.process_cursor_motion(time_msec);
    }

    fn process_cursor_motion(&mut self, time_msec: u32) {
        match self.cursor.mode {
            PointerMode::Moving { view, grab } => self.process_cursor_move(view, grab),
            PointerMode::Resizing { view, grab, edges } => {
                self.process_cursor_resize(view, grab, edges)
            }
            PointerMode::Passthrough => match self.scene.view_at(self.cursor.x, self.cursor.y) {
                Some(hit) => {
                    // Pointer focus follows hover, independent of
                    // keyboard focus
                    if self.seat.pointer_focus != Some(hit.surface) {
                        self.seat.pointer_focus = Some(hit.surface);
                        self.shell.pointer_enter(hit.surface, hit.sx, hit.sy);
                    }
                    self.shell.pointer_motion(time_msec, hit.sx, hit.sy);
                }
                None => {
                    self.backend.set_cursor_default();
                    if self.seat.pointer_focus.take().is_some() {
                        // Otherwise the last hovered client keeps
                        // receiving phantom motion
                        self.shell.pointer_clear_focus();
                    }
                }
            },
        }
    }

    fn process_cursor_move(&mut self, view: ViewId, grab: GrabStart) {
        let position = Point::new(
            (self.cursor.x - grab.offset_x) as i32,
            (self.cursor.y - grab.offset_y) as i32,
        );
        if let Some(v) = self.views.get_mut(view) {
            v.position = position;
            let node = v.node;
            self.scene.set_position(node, position);
        }
    }

    fn process_cursor_resize(&mut self, view: ViewId, grab: GrabStart, edges: ResizeEdges) {
        let Some(v) = self.views.get(view).copied() else {
            return;
        };
        let border_x = self.cursor.x - grab.offset_x;
        let border_y = self.cursor.y - grab.offset_y;

        let mut new_left = grab.geometry.x;
        let mut new_right = grab.geometry.right();
        let mut new_top = grab.geometry.y;
        let mut new_bottom = grab.geometry.bottom();

        // Each moving edge is clamped one unit short of its fixed
        // opposite, so the window never collapses or inverts
        if edges.contains(ResizeEdges::TOP) {
            new_top = border_y as i32;
            if new_top >= new_bottom {
                new_top = new_bottom - 1;
            }
        } else if edges.contains(ResizeEdges::BOTTOM) {
            new_bottom = border_y as i32;
            if new_bottom <= new_top {
                new_bottom = new_top + 1;
            }
        }
        if edges.contains(ResizeEdges::LEFT) {
            new_left = border_x as i32;
            if new_left >= new_right {
                new_left = new_right - 1;
            }
        } else if edges.contains(ResizeEdges::RIGHT) {
            new_right = border_x as i32;
            if new_right <= new_left {
                new_right = new_left + 1;
            }
        }

        // The frame position accounts for the client's content origin
        // offset; the size change itself is asynchronous, committed by
        // the client
        let geo = self.shell.surface_geometry(v.surface);
        let position = Point::new(new_left - geo.x, new_top - geo.y);
        if let Some(vm) = self.views.get_mut(view) {
            vm.position = position;
        }
        self.scene.set_position(v.node, position);
        self.shell
            .request_size(v.surface, Size::new(new_right - new_left, new_bottom - new_top));
    }

    /// Pointer button: forward to the pointer focus, then update
    /// focus/grab state
    pub fn on_pointer_button(&mut self, button: u32, state: ButtonState, time_msec: u32) {
        self.shell.pointer_button(time_msec, button, state);
        match state {
            ButtonState::Released => {
                // Hard invariant: no grab survives a release
                self.cursor.mode = PointerMode::Passthrough;
            }
            ButtonState::Pressed => {
                if let Some(hit) = self.scene.view_at(self.cursor.x, self.cursor.y) {
                    self.focus_view(Some(hit.view), Some(hit.surface));
                }
            }
        }
    }

    /// Forward a scroll event to the pointer focus
    pub fn on_pointer_axis(
        &mut self,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
        time_msec: u32,
    ) {
        self.shell
            .pointer_axis(time_msec, orientation, delta, delta_discrete);
    }

    /// Start an interactive move for a client that asked for one
    pub fn begin_move(&mut self, surface: SurfaceHandle) {
        let Some((view_id, view)) = self.interactive_target(surface) else {
            return;
        };
        let grab = GrabStart {
            offset_x: self.cursor.x - view.position.x as f64,
            offset_y: self.cursor.y - view.position.y as f64,
            geometry: Rect::default(),
        };
        self.cursor.mode = PointerMode::Moving {
            view: view_id,
            grab,
        };
    }

    /// Start an interactive resize against the given edge set
    pub fn begin_resize(&mut self, surface: SurfaceHandle, edges: ResizeEdges) {
        let Some((view_id, view)) = self.interactive_target(surface) else {
            return;
        };
        let geo = self.shell.surface_geometry(surface);
        let border_x = (view.position.x + geo.x) as f64
            + if edges.contains(ResizeEdges::RIGHT) {
                geo.w as f64
            } else {
                0.0
            };
        let border_y = (view.position.y + geo.y) as f64
            + if edges.contains(ResizeEdges::BOTTOM) {
                geo.h as f64
            } else {
                0.0
            };
        let mut geometry = geo;
        geometry.x += view.position.x;
        geometry.y += view.position.y;
        let grab = GrabStart {
            offset_x: self.cursor.x - border_x,
            offset_y: self.cursor.y - border_y,
            geometry,
        };
        self.cursor.mode = PointerMode::Resizing {
            view: view_id,
            grab,
            edges,
        };
    }

    /// Resolve and vet the target of an interactive request. Unfocused
    /// clients cannot start a grab.
    fn interactive_target(&self, surface: SurfaceHandle) -> Option<(ViewId, crate::view::View)> {
        let view_id = self.views.find_by_surface(surface)?;
        let view = self.views.get(view_id).copied()?;
        if self.seat.keyboard_focus.map(|f| f.surface) != Some(surface) {
            debug!("interactive request from unfocused surface {surface:?}, denied");
            return None;
        }
        Some((view_id, view))
    }

    /// Drop the grab when the view it references goes away
    pub(crate) fn release_grab_if(&mut self, view: ViewId) {
        if self.cursor.grabbed_view() == Some(view) {
            self.cursor.mode = PointerMode::Passthrough;
        }
    }
}
