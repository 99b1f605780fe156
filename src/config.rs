//! Compositor configuration
//!
//! A small JSON-backed config: the accelerator modifier, key repeat
//! parameters and the keybinding table. Defaults match the classic
//! minimal setup: Alt as accelerator, Escape terminates, F1 cycles
//! focus.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CairnError, CairnResult};
use crate::input::{Keysym, Modifiers, RepeatInfo};
use crate::keybindings::KeyAction;

/// Named keysyms accepted in keybinding configs. Single printable
/// characters resolve directly, so the table only lists the rest.
static KEYSYM_NAMES: Lazy<HashMap<&'static str, Keysym>> = Lazy::new(|| {
    HashMap::from([
        ("Escape", Keysym::ESCAPE),
        ("Tab", Keysym::TAB),
        ("Return", Keysym::RETURN),
        ("space", Keysym::SPACE),
        ("F1", Keysym::F1),
        ("F2", Keysym::F2),
        ("F3", Keysym::F3),
        ("F4", Keysym::F4),
    ])
});

/// Resolve a key name from a config file to a keysym
pub fn keysym_from_name(name: &str) -> Option<Keysym> {
    if let Some(sym) = KEYSYM_NAMES.get(name) {
        return Some(*sym);
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        // Printable ASCII keysyms equal their character code
        (Some(c), None) if c.is_ascii_graphic() => Some(Keysym(c as u32)),
        _ => None,
    }
}

/// One configured keybinding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybinding {
    pub key: String,
    pub action: KeyAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Modifier reserved for compositor actions
    pub accelerator: String,
    pub repeat: RepeatInfo,
    pub keybindings: Vec<Keybinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accelerator: "alt".into(),
            repeat: RepeatInfo::default(),
            keybindings: vec![
                Keybinding {
                    key: "Escape".into(),
                    action: KeyAction::Quit,
                },
                Keybinding {
                    key: "F1".into(),
                    action: KeyAction::CycleFocus,
                },
            ],
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> CairnResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> CairnResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The accelerator as a modifier bit set
    pub fn accelerator_modifier(&self) -> CairnResult<Modifiers> {
        match self.accelerator.as_str() {
            "shift" => Ok(Modifiers::SHIFT),
            "ctrl" => Ok(Modifiers::CTRL),
            "alt" => Ok(Modifiers::ALT),
            "logo" | "super" => Ok(Modifiers::LOGO),
            other => Err(CairnError::Config(format!(
                "unknown accelerator modifier: {other}"
            ))),
        }
    }

    /// The keybinding table resolved to keysyms
    pub fn resolved_bindings(&self) -> CairnResult<HashMap<Keysym, KeyAction>> {
        let mut table = HashMap::new();
        for binding in &self.keybindings {
            let sym = keysym_from_name(&binding.key)
                .ok_or_else(|| CairnError::UnknownKey(binding.key.clone()))?;
            table.insert(sym, binding.action);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_quit_and_cycle() {
        let config = Config::default();
        let table = config.resolved_bindings().unwrap();
        assert_eq!(table.get(&Keysym::ESCAPE), Some(&KeyAction::Quit));
        assert_eq!(table.get(&Keysym::F1), Some(&KeyAction::CycleFocus));
        assert_eq!(config.accelerator_modifier().unwrap(), Modifiers::ALT);
    }

    #[test]
    fn parses_json_overrides() {
        let config = Config::from_json(
            r#"{
                "accelerator": "logo",
                "repeat": { "rate": 40, "delay": 300 },
                "keybindings": [
                    { "key": "q", "action": "quit" },
                    { "key": "Tab", "action": "cycle_focus" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.accelerator_modifier().unwrap(), Modifiers::LOGO);
        assert_eq!(config.repeat.rate, 40);
        let table = config.resolved_bindings().unwrap();
        assert_eq!(table.get(&Keysym(b'q' as u32)), Some(&KeyAction::Quit));
        assert_eq!(table.get(&Keysym::TAB), Some(&KeyAction::CycleFocus));
    }

    #[test]
    fn unknown_key_name_is_an_error() {
        let config = Config {
            keybindings: vec![Keybinding {
                key: "NoSuchKey".into(),
                action: KeyAction::Quit,
            }],
            ..Config::default()
        };
        assert!(config.resolved_bindings().is_err());
    }
}
