//! Core compositor state
//!
//! One explicit context value owns every registry and is passed by
//! mutable reference into every handler. Exactly one event is processed
//! to completion before the next; all invariants hold again by the time
//! a handler returns.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::backend::{Backend, OutputHandle};
use crate::config::Config;
use crate::error::{log_error, CairnResult};
use crate::event::{DeviceCapability, InputEvent, OutputEvent, ShellEvent};
use crate::geometry::{Point, Size};
use crate::input::{DeviceRegistry, Keyboard, Keysym, Modifiers};
use crate::input::pointer::CursorState;
use crate::keybindings::KeyAction;
use crate::output::{OutputId, OutputSet};
use crate::scene::{Hit, Scene};
use crate::seat::Seat;
use crate::shell::{ClientId, Shell, SurfaceHandle};
use crate::view::{View, ViewId, ViewRegistry};

/// The compositor core: views, outputs, devices, seat and cursor state,
/// plus the collaborator links everything is driven through
pub struct CairnState<S: Shell, B: Backend> {
    pub shell: S,
    pub backend: B,
    pub config: Config,
    pub(crate) accelerator: Modifiers,
    pub(crate) bindings: HashMap<Keysym, KeyAction>,
    pub scene: Scene,
    pub views: ViewRegistry,
    pub outputs: OutputSet,
    pub devices: DeviceRegistry,
    pub seat: Seat,
    pub cursor: CursorState,
    /// Cleared by the terminate action; the event loop checks it
    pub running: bool,
}

impl<S: Shell, B: Backend> CairnState<S, B> {
    pub fn new(shell: S, backend: B, config: Config) -> CairnResult<Self> {
        let accelerator = config.accelerator_modifier()?;
        let bindings = config.resolved_bindings()?;
        Ok(Self {
            shell,
            backend,
            config,
            accelerator,
            bindings,
            scene: Scene::new(),
            views: ViewRegistry::new(),
            outputs: OutputSet::new(),
            devices: DeviceRegistry::new(),
            seat: Seat::new(),
            cursor: CursorState::new(),
            running: true,
        })
    }

    /// Dispatch one device-backend event
    pub fn handle_input_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::DeviceAdded { device, capability } => match capability {
                DeviceCapability::Keyboard { keymap } => {
                    let repeat = self.config.repeat;
                    self.devices
                        .add_keyboard(Keyboard::new(device, keymap, repeat));
                    // Newest keyboard becomes the seat's effective one
                    self.seat.active_keyboard = Some(device);
                    self.announce_capabilities();
                }
                DeviceCapability::Pointer => {
                    self.devices.add_pointer(device);
                    self.announce_capabilities();
                }
            },
            InputEvent::DeviceRemoved { device } => {
                self.devices.remove(device);
                if self.seat.active_keyboard == Some(device) {
                    self.seat.active_keyboard = None;
                }
                self.announce_capabilities();
            }
            InputEvent::PointerMotion {
                delta_x,
                delta_y,
                time_msec,
            } => self.on_pointer_motion(delta_x, delta_y, time_msec),
            InputEvent::PointerMotionAbsolute { x, y, time_msec } => {
                self.on_pointer_motion_absolute(x, y, time_msec)
            }
            InputEvent::PointerButton {
                button,
                state,
                time_msec,
            } => self.on_pointer_button(button, state, time_msec),
            InputEvent::PointerAxis {
                orientation,
                delta,
                delta_discrete,
                time_msec,
            } => self.on_pointer_axis(orientation, delta, delta_discrete, time_msec),
            InputEvent::KeyboardKey {
                device,
                keycode,
                state,
                time_msec,
            } => self.on_keyboard_key(device, keycode, state, time_msec),
            InputEvent::KeyboardModifiers { device, modifiers } => {
                self.on_keyboard_modifiers(device, modifiers)
            }
        }
    }

    /// Dispatch one surface-protocol event
    pub fn handle_shell_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::SurfaceReadyToMap { surface, client } => {
                self.map_surface(surface, client);
            }
            ShellEvent::SurfaceUnmapped { surface } => self.unmap_surface(surface),
            ShellEvent::SurfaceDestroyed { surface } => self.destroy_surface(surface),
            ShellEvent::SurfaceCommitted { surface } => self.surface_committed(surface),
            ShellEvent::RequestMove { surface } => self.begin_move(surface),
            ShellEvent::RequestResize { surface, edges } => self.begin_resize(surface, edges),
            ShellEvent::RequestMaximize { surface } => {
                debug!("maximize request for {surface:?} ignored")
            }
            ShellEvent::RequestFullscreen { surface } => {
                debug!("fullscreen request for {surface:?} ignored")
            }
            ShellEvent::SetSelection { source, serial } => self.set_selection(source, serial),
            ShellEvent::SetCursorImage {
                client,
                surface,
                hotspot_x,
                hotspot_y,
            } => self.set_cursor_image(client, surface, hotspot_x, hotspot_y),
        }
    }

    /// Dispatch one display hotplug event
    pub fn handle_output_event(&mut self, event: OutputEvent) {
        match event {
            OutputEvent::Added { handle } => {
                self.add_output(handle);
            }
            OutputEvent::Removed { handle } => self.remove_output(handle),
        }
    }

    /// Enable a display and place it in the layout
    pub fn add_output(&mut self, handle: OutputHandle) -> Option<OutputId> {
        let Some(mode) = self.backend.enable_output(handle) else {
            warn!("output {handle:?} vanished before it could be enabled");
            return None;
        };
        let id = self.outputs.add(handle, mode);
        info!(
            "output {handle:?} enabled as {id} at {:?}",
            self.outputs.get(id).map(|o| o.rect)
        );
        Some(id)
    }

    /// Disable a display and scrub its placement
    pub fn remove_output(&mut self, handle: OutputHandle) {
        let Some(id) = self.outputs.find_by_handle(handle) else {
            warn!("removal of unknown output {handle:?}, ignoring");
            return;
        };
        self.backend.disable_output(handle);
        self.outputs.remove(id);
        info!("output {id} removed");
    }

    /// A window is ready to appear: create (or re-enable) its view and
    /// give it focus
    pub fn map_surface(&mut self, surface: SurfaceHandle, client: ClientId) -> ViewId {
        if let Some(id) = self.views.find_by_surface(surface) {
            // A surface can unmap and come back; it keeps its identity
            log_error(self.views.map(id));
            if let Some(view) = self.views.get(id).copied() {
                self.scene.set_enabled(view.node, true);
                self.scene.raise_to_top(view.node);
            }
            self.focus_view(Some(id), Some(surface));
            return id;
        }

        let geometry = self.shell.surface_geometry(surface);
        let node = self.scene.create_tree(self.scene.root());
        let id = ViewId::next();
        self.scene.tag(node, id);
        let content = self
            .scene
            .create_content(node, geometry.origin(), geometry.size(), surface);
        self.views.insert(View {
            id,
            surface,
            client,
            position: Point::default(),
            node,
            content,
            geometry,
            mapped: true,
        });
        debug!("mapped {surface:?} as {id}");
        self.focus_view(Some(id), Some(surface));
        id
    }

    /// A window disappeared from screen: drop it from stacking, scrub
    /// focus and grab references, keep the record for a possible re-map
    pub fn unmap_surface(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.find_by_surface(surface) else {
            debug!("unmap for unknown surface {surface:?}, ignoring");
            return;
        };
        self.release_grab_if(id);
        if self.seat.keyboard_focus.map(|f| f.view) == Some(id) {
            self.clear_keyboard_focus();
        }
        if self.seat.pointer_focus == Some(surface) {
            self.seat.pointer_focus = None;
            self.shell.pointer_clear_focus();
        }
        log_error(self.views.unmap(id));
        if let Some(view) = self.views.get(id) {
            let node = view.node;
            self.scene.set_enabled(node, false);
        }
    }

    /// A window is gone for good
    pub fn destroy_surface(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.find_by_surface(surface) else {
            debug!("destroy for unknown surface {surface:?}, ignoring");
            return;
        };
        // Normally unmap precedes destroy, but scrub either way
        self.release_grab_if(id);
        if self.seat.keyboard_focus.map(|f| f.view) == Some(id) {
            self.clear_keyboard_focus();
        }
        if self.seat.pointer_focus == Some(surface) {
            self.seat.pointer_focus = None;
            self.shell.pointer_clear_focus();
        }
        if let Some(view) = self.views.remove(id) {
            self.scene.destroy(view.node);
        }
        debug!("destroyed {id}");
    }

    /// The client committed a buffer; refresh the acknowledged geometry
    pub fn surface_committed(&mut self, surface: SurfaceHandle) {
        let Some(id) = self.views.find_by_surface(surface) else {
            return;
        };
        let geometry = self.shell.surface_geometry(surface);
        if let Some(view) = self.views.get_mut(id) {
            view.geometry = geometry;
            let content = view.content;
            self.scene
                .set_content_region(content, geometry.origin(), geometry.size());
        }
    }

    /// Bring a view to the front of stacking and paint order without
    /// touching focus
    pub fn raise_view(&mut self, id: ViewId) {
        if log_error(self.views.raise(id)).is_none() {
            return;
        }
        if let Some(view) = self.views.get(id) {
            let node = view.node;
            self.scene.raise_to_top(node);
        }
    }

    /// Reposition a view in global coordinates
    pub fn move_view(&mut self, id: ViewId, x: i32, y: i32) {
        let Some(view) = self.views.get_mut(id) else {
            debug!("move for unknown {id}, ignoring");
            return;
        };
        let position = Point::new(x, y);
        view.position = position;
        let node = view.node;
        self.scene.set_position(node, position);
    }

    /// Ask a view's client to adopt a new size. The visible change is
    /// asynchronous; the client commits the buffer.
    pub fn resize_view(&mut self, id: ViewId, width: i32, height: i32) {
        let Some(view) = self.views.get(id) else {
            debug!("resize for unknown {id}, ignoring");
            return;
        };
        let surface = view.surface;
        self.shell.request_size(surface, Size::new(width, height));
    }

    /// Topmost view under a global point, with surface-local coordinates
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Hit> {
        self.scene.view_at(x, y)
    }
}
