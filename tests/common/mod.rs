//! Shared helpers: every test builds a fresh headless state and drives
//! it through the public event handlers.

#![allow(dead_code)]

use cairn::config::Config;
use cairn::event::{ButtonState, DeviceCapability, InputEvent};
use cairn::geometry::Rect;
use cairn::headless::{HeadlessBackend, RecordingShell, ShellCommand, StaticKeymap};
use cairn::input::{DeviceId, KeyState, Keycode, Modifiers};
use cairn::shell::{ClientId, SurfaceHandle};
use cairn::view::ViewId;
use cairn::CairnState;

pub type TestState = CairnState<RecordingShell, HeadlessBackend>;

pub fn new_state() -> TestState {
    CairnState::new(
        RecordingShell::new(),
        HeadlessBackend::new(),
        Config::default(),
    )
    .expect("default config is valid")
}

/// Map a surface with the given content geometry; the client id mirrors
/// the surface number.
pub fn map_view(state: &mut TestState, surface: u64, geometry: Rect) -> ViewId {
    let handle = SurfaceHandle(surface);
    state.shell.set_geometry(handle, geometry);
    state.map_surface(handle, ClientId(surface))
}

pub fn add_keyboard(state: &mut TestState, device: u64) {
    state.handle_input_event(InputEvent::DeviceAdded {
        device: DeviceId(device),
        capability: DeviceCapability::Keyboard {
            keymap: Box::new(StaticKeymap::us_minimal()),
        },
    });
}

pub fn remove_device(state: &mut TestState, device: u64) {
    state.handle_input_event(InputEvent::DeviceRemoved {
        device: DeviceId(device),
    });
}

pub fn set_modifiers(state: &mut TestState, device: u64, modifiers: Modifiers) {
    state.handle_input_event(InputEvent::KeyboardModifiers {
        device: DeviceId(device),
        modifiers,
    });
}

pub fn press_key(state: &mut TestState, device: u64, keycode: u32) {
    state.handle_input_event(InputEvent::KeyboardKey {
        device: DeviceId(device),
        keycode: Keycode(keycode),
        state: KeyState::Pressed,
        time_msec: 0,
    });
}

pub fn release_key(state: &mut TestState, device: u64, keycode: u32) {
    state.handle_input_event(InputEvent::KeyboardKey {
        device: DeviceId(device),
        keycode: Keycode(keycode),
        state: KeyState::Released,
        time_msec: 0,
    });
}

/// Move the cursor to an absolute position through relative deltas
pub fn motion_to(state: &mut TestState, x: f64, y: f64) {
    let dx = x - state.cursor.x;
    let dy = y - state.cursor.y;
    state.on_pointer_motion(dx, dy, 0);
}

pub fn press_button(state: &mut TestState, button: u32) {
    state.on_pointer_button(button, ButtonState::Pressed, 0);
}

pub fn release_button(state: &mut TestState, button: u32) {
    state.on_pointer_button(button, ButtonState::Released, 0);
}

/// How many times a surface was (de)activated
pub fn activation_count(commands: &[ShellCommand], surface: u64, active: bool) -> usize {
    commands
        .iter()
        .filter(|c| {
            matches!(c, ShellCommand::Activated { surface: s, active: a }
                if *s == SurfaceHandle(surface) && *a == active)
        })
        .count()
}
