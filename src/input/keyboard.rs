//! Keyboard input handling
//!
//! Every keyboard feeds the one seat. Modifier updates and forwarded
//! keys redesignate the source device as the seat's active keyboard, so
//! multiple physical keyboards behave as a single logical one,
//! last-active-wins.

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::input::{DeviceId, KeyState, Keycode, Keysym, Modifiers};
use crate::shell::Shell;
use crate::state::CairnState;

impl<S: Shell, B: Backend> CairnState<S, B> {
    /// Forward a keyboard's modifier state to the seat
    pub fn on_keyboard_modifiers(&mut self, device: DeviceId, modifiers: Modifiers) {
        let Some(kb) = self.devices.keyboard_mut(device) else {
            warn!("modifiers from unregistered device {device:?}, dropping");
            return;
        };
        kb.modifiers = modifiers;
        self.seat.active_keyboard = Some(device);
        self.shell.forward_modifiers(modifiers);
    }

    /// Process a key event: accelerator interception first, client
    /// forwarding otherwise
    pub fn on_keyboard_key(
        &mut self,
        device: DeviceId,
        keycode: Keycode,
        state: KeyState,
        time_msec: u32,
    ) {
        let Some(kb) = self.devices.keyboard_mut(device) else {
            warn!("key from unregistered device {device:?}, dropping");
            return;
        };
        kb.record_key(keycode, state);
        let modifiers = kb.modifiers;
        let syms: Vec<Keysym> = kb.keymap.keysyms(keycode).to_vec();

        let mut handled = false;
        if modifiers.contains(self.accelerator) && state == KeyState::Pressed {
            // One matching symbol is enough to consume the whole event
            for sym in syms {
                if self.process_keybinding(sym) {
                    handled = true;
                }
            }
        }

        if !handled {
            // Unbound accelerator combinations fall through to the
            // client unchanged, raw keycode and all
            debug!(?keycode, ?state, "forwarding key to focus");
            self.seat.active_keyboard = Some(device);
            self.shell.forward_key(time_msec, keycode, state);
        }
    }
}
