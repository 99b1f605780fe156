//! Input device tracking
//!
//! The device registry owns every keyboard record and counts attached
//! pointers. All devices funnel into one logical seat; the registry only
//! reports aggregate capability, focus policy lives in [`crate::seat`].

pub mod keyboard;
pub mod pointer;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::seat::SeatCapabilities;

/// Identity of an input device, assigned by the device backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DeviceId(pub u64);

/// A physical key code as delivered by the device backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Keycode(pub u32);

/// A logical key symbol resolved through a keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Keysym(pub u32);

impl Keysym {
    pub const ESCAPE: Keysym = Keysym(0xff1b);
    pub const TAB: Keysym = Keysym(0xff09);
    pub const RETURN: Keysym = Keysym(0xff0d);
    pub const SPACE: Keysym = Keysym(0x0020);
    pub const F1: Keysym = Keysym(0xffbe);
    pub const F2: Keysym = Keysym(0xffbf);
    pub const F3: Keysym = Keysym(0xffc0);
    pub const F4: Keysym = Keysym(0xffc1);
}

/// Pressed/released state of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

bitflags::bitflags! {
    /// Modifier state reported by a keyboard
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

/// Key repeat configuration, in the units the protocol layer expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatInfo {
    /// Repeats per second
    pub rate: i32,
    /// Delay before the first repeat, in milliseconds
    pub delay: i32,
}

impl Default for RepeatInfo {
    fn default() -> Self {
        Self {
            rate: 25,
            delay: 600,
        }
    }
}

/// A compiled keymap, supplied by the device backend at device-add time.
///
/// Keymap compilation happens outside this core; the registry only asks
/// which logical symbols a physical keycode currently resolves to.
pub trait Keymap {
    fn keysyms(&self, keycode: Keycode) -> &[Keysym];
}

/// One keyboard-class input device
pub struct Keyboard {
    pub device: DeviceId,
    pub keymap: Box<dyn Keymap>,
    pub modifiers: Modifiers,
    /// Keycodes currently held down, in press order
    pub pressed: Vec<Keycode>,
    pub repeat: RepeatInfo,
}

impl Keyboard {
    pub fn new(device: DeviceId, keymap: Box<dyn Keymap>, repeat: RepeatInfo) -> Self {
        Self {
            device,
            keymap,
            modifiers: Modifiers::empty(),
            pressed: Vec::new(),
            repeat,
        }
    }

    /// Track a key transition in the pressed set
    pub fn record_key(&mut self, keycode: Keycode, state: KeyState) {
        match state {
            KeyState::Pressed => {
                if !self.pressed.contains(&keycode) {
                    self.pressed.push(keycode);
                }
            }
            KeyState::Released => self.pressed.retain(|k| *k != keycode),
        }
    }
}

impl fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyboard")
            .field("device", &self.device)
            .field("modifiers", &self.modifiers)
            .field("pressed", &self.pressed)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

/// Registry of attached input devices
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    keyboards: HashMap<DeviceId, Keyboard>,
    pointers: HashSet<DeviceId>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_keyboard(&mut self, keyboard: Keyboard) {
        self.keyboards.insert(keyboard.device, keyboard);
    }

    pub fn add_pointer(&mut self, device: DeviceId) {
        self.pointers.insert(device);
    }

    /// Remove a device of either class. Returns whether it was a keyboard.
    pub fn remove(&mut self, device: DeviceId) -> bool {
        if self.keyboards.remove(&device).is_some() {
            true
        } else {
            self.pointers.remove(&device);
            false
        }
    }

    pub fn keyboard(&self, device: DeviceId) -> Option<&Keyboard> {
        self.keyboards.get(&device)
    }

    pub fn keyboard_mut(&mut self, device: DeviceId) -> Option<&mut Keyboard> {
        self.keyboards.get_mut(&device)
    }

    pub fn has_keyboard(&self) -> bool {
        !self.keyboards.is_empty()
    }

    /// Any keyboard, used when the active designation was cleared
    pub fn any_keyboard(&self) -> Option<DeviceId> {
        self.keyboards.keys().next().copied()
    }

    /// Aggregate seat capability. The pointer capability is always
    /// announced, matching the upstream seat contract.
    pub fn capabilities(&self) -> SeatCapabilities {
        let mut caps = SeatCapabilities::POINTER;
        if self.has_keyboard() {
            caps |= SeatCapabilities::KEYBOARD;
        }
        caps
    }
}
