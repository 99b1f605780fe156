//! Headless collaborators for automated testing
//!
//! A recording shell and backend that capture every outgoing command,
//! plus a static keymap and a serde event script, so the whole core can
//! be driven and observed without any real protocol or hardware layer.
//! Integration tests and the binary's script mode both build on these.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, OutputHandle, OutputMode};
use crate::event::{AxisOrientation, ButtonState, DeviceCapability, InputEvent, OutputEvent, ShellEvent};
use crate::geometry::{Rect, ResizeEdges, Size};
use crate::input::{DeviceId, KeyState, Keycode, Keymap, Keysym, Modifiers};
use crate::seat::SeatCapabilities;
use crate::shell::{ClientId, SelectionSource, Shell, SurfaceHandle};
use crate::state::CairnState;

/// Everything the core asked the surface-protocol layer to do
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Activated {
        surface: SurfaceHandle,
        active: bool,
    },
    SizeRequested {
        surface: SurfaceHandle,
        size: Size,
    },
    KeyboardEnter {
        surface: SurfaceHandle,
        pressed: Vec<Keycode>,
        modifiers: Modifiers,
    },
    KeyboardLeave {
        surface: SurfaceHandle,
    },
    Key {
        time_msec: u32,
        keycode: Keycode,
        state: KeyState,
    },
    ModifiersForwarded {
        modifiers: Modifiers,
    },
    PointerEnter {
        surface: SurfaceHandle,
        sx: f64,
        sy: f64,
    },
    PointerClearFocus,
    PointerMotion {
        time_msec: u32,
        sx: f64,
        sy: f64,
    },
    PointerButton {
        time_msec: u32,
        button: u32,
        state: ButtonState,
    },
    PointerAxis {
        time_msec: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
    },
    Capabilities {
        capabilities: SeatCapabilities,
    },
    SelectionPublished {
        source: SelectionSource,
        serial: u32,
    },
}

/// Shell stand-in that records commands and serves configured
/// per-surface geometry
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub commands: Vec<ShellCommand>,
    pub geometries: HashMap<SurfaceHandle, Rect>,
    pub default_geometry: Rect,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            geometries: HashMap::new(),
            default_geometry: Rect::new(0, 0, 640, 480),
        }
    }

    pub fn set_geometry(&mut self, surface: SurfaceHandle, geometry: Rect) {
        self.geometries.insert(surface, geometry);
    }

    /// Take every recorded command, leaving the log empty
    pub fn drain(&mut self) -> Vec<ShellCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Shell for RecordingShell {
    fn set_activated(&mut self, surface: SurfaceHandle, active: bool) {
        self.commands.push(ShellCommand::Activated { surface, active });
    }

    fn request_size(&mut self, surface: SurfaceHandle, size: Size) {
        self.commands.push(ShellCommand::SizeRequested { surface, size });
    }

    fn surface_geometry(&mut self, surface: SurfaceHandle) -> Rect {
        self.geometries
            .get(&surface)
            .copied()
            .unwrap_or(self.default_geometry)
    }

    fn keyboard_enter(
        &mut self,
        surface: SurfaceHandle,
        pressed: &[Keycode],
        modifiers: Modifiers,
    ) {
        self.commands.push(ShellCommand::KeyboardEnter {
            surface,
            pressed: pressed.to_vec(),
            modifiers,
        });
    }

    fn keyboard_leave(&mut self, surface: SurfaceHandle) {
        self.commands.push(ShellCommand::KeyboardLeave { surface });
    }

    fn forward_key(&mut self, time_msec: u32, keycode: Keycode, state: KeyState) {
        self.commands.push(ShellCommand::Key {
            time_msec,
            keycode,
            state,
        });
    }

    fn forward_modifiers(&mut self, modifiers: Modifiers) {
        self.commands
            .push(ShellCommand::ModifiersForwarded { modifiers });
    }

    fn pointer_enter(&mut self, surface: SurfaceHandle, sx: f64, sy: f64) {
        self.commands.push(ShellCommand::PointerEnter { surface, sx, sy });
    }

    fn pointer_clear_focus(&mut self) {
        self.commands.push(ShellCommand::PointerClearFocus);
    }

    fn pointer_motion(&mut self, time_msec: u32, sx: f64, sy: f64) {
        self.commands
            .push(ShellCommand::PointerMotion { time_msec, sx, sy });
    }

    fn pointer_button(&mut self, time_msec: u32, button: u32, state: ButtonState) {
        self.commands.push(ShellCommand::PointerButton {
            time_msec,
            button,
            state,
        });
    }

    fn pointer_axis(
        &mut self,
        time_msec: u32,
        orientation: AxisOrientation,
        delta: f64,
        delta_discrete: i32,
    ) {
        self.commands.push(ShellCommand::PointerAxis {
            time_msec,
            orientation,
            delta,
            delta_discrete,
        });
    }

    fn set_capabilities(&mut self, capabilities: SeatCapabilities) {
        self.commands
            .push(ShellCommand::Capabilities { capabilities });
    }

    fn publish_selection(&mut self, source: SelectionSource, serial: u32) {
        self.commands
            .push(ShellCommand::SelectionPublished { source, serial });
    }
}

/// Everything the core asked the backend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    OutputEnabled(OutputHandle),
    OutputDisabled(OutputHandle),
    CursorDefault,
    CursorSurface {
        surface: SurfaceHandle,
        hotspot_x: i32,
        hotspot_y: i32,
    },
}

/// Backend stand-in with configurable display modes
#[derive(Debug)]
pub struct HeadlessBackend {
    pub commands: Vec<BackendCommand>,
    pub modes: HashMap<OutputHandle, OutputMode>,
    pub default_mode: OutputMode,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            modes: HashMap::new(),
            default_mode: OutputMode {
                size: Size::new(1920, 1080),
                refresh_mhz: 60_000,
            },
        }
    }

    pub fn drain(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn enable_output(&mut self, handle: OutputHandle) -> Option<OutputMode> {
        self.commands.push(BackendCommand::OutputEnabled(handle));
        Some(self.modes.get(&handle).copied().unwrap_or(self.default_mode))
    }

    fn disable_output(&mut self, handle: OutputHandle) {
        self.commands.push(BackendCommand::OutputDisabled(handle));
    }

    fn set_cursor_default(&mut self) {
        self.commands.push(BackendCommand::CursorDefault);
    }

    fn set_cursor_surface(&mut self, surface: SurfaceHandle, hotspot_x: i32, hotspot_y: i32) {
        self.commands.push(BackendCommand::CursorSurface {
            surface,
            hotspot_x,
            hotspot_y,
        });
    }
}

/// Fixed keycode-to-keysym table standing in for a compiled keymap
#[derive(Debug, Default)]
pub struct StaticKeymap {
    map: HashMap<Keycode, Vec<Keysym>>,
}

impl StaticKeymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, keycode: u32, sym: Keysym) -> Self {
        self.map.entry(Keycode(keycode)).or_default().push(sym);
        self
    }

    /// A handful of evdev keycodes from a US layout, enough to exercise
    /// the default bindings
    pub fn us_minimal() -> Self {
        Self::new()
            .bind(1, Keysym::ESCAPE)
            .bind(15, Keysym::TAB)
            .bind(28, Keysym::RETURN)
            .bind(57, Keysym::SPACE)
            .bind(59, Keysym::F1)
            .bind(60, Keysym::F2)
            .bind(16, Keysym(b'q' as u32))
            .bind(17, Keysym(b'w' as u32))
            .bind(30, Keysym(b'a' as u32))
            .bind(31, Keysym(b's' as u32))
    }
}

impl Keymap for StaticKeymap {
    fn keysyms(&self, keycode: Keycode) -> &[Keysym] {
        self.map.get(&keycode).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

fn modifiers_from_names(names: &[String]) -> Modifiers {
    let mut mods = Modifiers::empty();
    for name in names {
        match name.as_str() {
            "shift" => mods |= Modifiers::SHIFT,
            "caps" => mods |= Modifiers::CAPS,
            "ctrl" => mods |= Modifiers::CTRL,
            "alt" => mods |= Modifiers::ALT,
            "logo" | "super" => mods |= Modifiers::LOGO,
            other => tracing::warn!("unknown modifier name {other:?} in script"),
        }
    }
    mods
}

fn edges_from_names(names: &[String]) -> ResizeEdges {
    let mut edges = ResizeEdges::empty();
    for name in names {
        match name.as_str() {
            "top" => edges |= ResizeEdges::TOP,
            "bottom" => edges |= ResizeEdges::BOTTOM,
            "left" => edges |= ResizeEdges::LEFT,
            "right" => edges |= ResizeEdges::RIGHT,
            other => tracing::warn!("unknown edge name {other:?} in script"),
        }
    }
    edges
}

/// One step of a headless event script
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    AddOutput {
        handle: u64,
    },
    RemoveOutput {
        handle: u64,
    },
    AddKeyboard {
        device: u64,
    },
    AddPointer {
        device: u64,
    },
    RemoveDevice {
        device: u64,
    },
    MapSurface {
        surface: u64,
        client: u64,
        #[serde(default)]
        geometry: Option<Rect>,
    },
    UnmapSurface {
        surface: u64,
    },
    DestroySurface {
        surface: u64,
    },
    CommitSurface {
        surface: u64,
        geometry: Rect,
    },
    RequestMove {
        surface: u64,
    },
    RequestResize {
        surface: u64,
        edges: Vec<String>,
    },
    Motion {
        dx: f64,
        dy: f64,
        #[serde(default)]
        time: u32,
    },
    MotionAbsolute {
        x: f64,
        y: f64,
        #[serde(default)]
        time: u32,
    },
    Button {
        button: u32,
        pressed: bool,
        #[serde(default)]
        time: u32,
    },
    Key {
        device: u64,
        keycode: u32,
        pressed: bool,
        #[serde(default)]
        time: u32,
    },
    Modifiers {
        device: u64,
        mods: Vec<String>,
    },
    SetSelection {
        source: u64,
        serial: u32,
    },
}

impl ScriptEvent {
    /// Apply one script step to a headless state
    pub fn apply(self, state: &mut CairnState<RecordingShell, HeadlessBackend>) {
        match self {
            ScriptEvent::AddOutput { handle } => state.handle_output_event(OutputEvent::Added {
                handle: OutputHandle(handle),
            }),
            ScriptEvent::RemoveOutput { handle } => {
                state.handle_output_event(OutputEvent::Removed {
                    handle: OutputHandle(handle),
                })
            }
            ScriptEvent::AddKeyboard { device } => {
                state.handle_input_event(InputEvent::DeviceAdded {
                    device: DeviceId(device),
                    capability: DeviceCapability::Keyboard {
                        keymap: Box::new(StaticKeymap::us_minimal()),
                    },
                })
            }
            ScriptEvent::AddPointer { device } => {
                state.handle_input_event(InputEvent::DeviceAdded {
                    device: DeviceId(device),
                    capability: DeviceCapability::Pointer,
                })
            }
            ScriptEvent::RemoveDevice { device } => {
                state.handle_input_event(InputEvent::DeviceRemoved {
                    device: DeviceId(device),
                })
            }
            ScriptEvent::MapSurface {
                surface,
                client,
                geometry,
            } => {
                let surface = SurfaceHandle(surface);
                if let Some(geometry) = geometry {
                    state.shell.set_geometry(surface, geometry);
                }
                state.handle_shell_event(ShellEvent::SurfaceReadyToMap {
                    surface,
                    client: ClientId(client),
                });
            }
            ScriptEvent::UnmapSurface { surface } => {
                state.handle_shell_event(ShellEvent::SurfaceUnmapped {
                    surface: SurfaceHandle(surface),
                })
            }
            ScriptEvent::DestroySurface { surface } => {
                state.handle_shell_event(ShellEvent::SurfaceDestroyed {
                    surface: SurfaceHandle(surface),
                })
            }
            ScriptEvent::CommitSurface { surface, geometry } => {
                let surface = SurfaceHandle(surface);
                state.shell.set_geometry(surface, geometry);
                state.handle_shell_event(ShellEvent::SurfaceCommitted { surface });
            }
            ScriptEvent::RequestMove { surface } => {
                state.handle_shell_event(ShellEvent::RequestMove {
                    surface: SurfaceHandle(surface),
                })
            }
            ScriptEvent::RequestResize { surface, edges } => {
                state.handle_shell_event(ShellEvent::RequestResize {
                    surface: SurfaceHandle(surface),
                    edges: edges_from_names(&edges),
                })
            }
            ScriptEvent::Motion { dx, dy, time } => {
                state.handle_input_event(InputEvent::PointerMotion {
                    delta_x: dx,
                    delta_y: dy,
                    time_msec: time,
                })
            }
            ScriptEvent::MotionAbsolute { x, y, time } => {
                state.handle_input_event(InputEvent::PointerMotionAbsolute {
                    x,
                    y,
                    time_msec: time,
                })
            }
            ScriptEvent::Button {
                button,
                pressed,
                time,
            } => state.handle_input_event(InputEvent::PointerButton {
                button,
                state: if pressed {
                    ButtonState::Pressed
                } else {
                    ButtonState::Released
                },
                time_msec: time,
            }),
            ScriptEvent::Key {
                device,
                keycode,
                pressed,
                time,
            } => state.handle_input_event(InputEvent::KeyboardKey {
                device: DeviceId(device),
                keycode: Keycode(keycode),
                state: if pressed {
                    KeyState::Pressed
                } else {
                    KeyState::Released
                },
                time_msec: time,
            }),
            ScriptEvent::Modifiers { device, mods } => {
                state.handle_input_event(InputEvent::KeyboardModifiers {
                    device: DeviceId(device),
                    modifiers: modifiers_from_names(&mods),
                })
            }
            ScriptEvent::SetSelection { source, serial } => {
                state.handle_shell_event(ShellEvent::SetSelection {
                    source: SelectionSource(source),
                    serial,
                })
            }
        }
    }
}
