//! Compositor-level keybindings
//!
//! A fixed table of logical symbol to action, consulted only while the
//! accelerator modifier is held. Unrecognized symbols are not errors,
//! merely not handled.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::input::Keysym;
use crate::shell::Shell;
use crate::state::CairnState;

/// Actions a keybinding can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Terminate the compositor
    Quit,
    /// Cycle focus to the previous window in the stacking order
    CycleFocus,
}

impl<S: Shell, B: Backend> CairnState<S, B> {
    /// Offer a symbol to the binding table. Returns whether it was
    /// recognized and consumed.
    pub fn process_keybinding(&mut self, sym: Keysym) -> bool {
        let Some(action) = self.bindings.get(&sym).copied() else {
            return false;
        };
        debug!(?sym, ?action, "keybinding");
        match action {
            KeyAction::Quit => {
                info!("terminate requested");
                self.running = false;
            }
            KeyAction::CycleFocus => self.cycle_focus(),
        }
        true
    }
}
