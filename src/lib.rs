//! cairn - the core interaction engine of a minimal stacking compositor
//!
//! cairn owns the set of on-screen client windows ("views"), the set of
//! input devices, the set of physical displays, and the logic that turns
//! raw input events into focus changes, window moves/resizes and
//! per-client input delivery. The protocol, device and render layers are
//! external collaborators reached through narrow traits.
//!
//! # Architecture
//!
//! - [`state`]: the one context value every handler mutates
//! - [`view`]: view records and the stacking order
//! - [`scene`]: node arena, view tagging and hit-testing
//! - [`seat`]: keyboard/pointer focus and the selection
//! - [`input`]: device registry, key handling, the cursor state machine
//! - [`output`]: display placement in the global coordinate space
//! - [`keybindings`]: accelerator-level compositor actions
//! - [`shell`] / [`backend`]: collaborator interfaces
//! - [`headless`]: recording collaborators for tests and scripted runs

#![warn(rust_2018_idioms)]

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod headless;
pub mod input;
pub mod keybindings;
pub mod output;
pub mod scene;
pub mod seat;
pub mod shell;
pub mod state;
pub mod view;

pub use error::{CairnError, CairnResult};
pub use state::CairnState;
