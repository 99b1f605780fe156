//! Keyboard focus: activation signals, cycling, selection hand-off

mod common;

use cairn::geometry::Rect;
use cairn::headless::ShellCommand;
use cairn::input::Keycode;
use cairn::shell::{SelectionSource, SurfaceHandle};
use common::{activation_count, add_keyboard, map_view, new_state, press_key};

fn geo() -> Rect {
    Rect::new(0, 0, 100, 100)
}

#[test]
fn newly_mapped_view_gets_focus() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    assert_eq!(state.seat.keyboard_focus.map(|f| f.view), Some(a));
    assert_eq!(activation_count(&state.shell.commands, 1, true), 1);
}

#[test]
fn refocusing_the_same_surface_sends_no_second_activation() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());

    state.focus_view(Some(a), Some(SurfaceHandle(1)));
    state.focus_view(Some(a), Some(SurfaceHandle(1)));

    assert_eq!(activation_count(&state.shell.commands, 1, true), 1);
    assert_eq!(activation_count(&state.shell.commands, 1, false), 0);
}

#[test]
fn focus_change_deactivates_the_previous_holder() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    map_view(&mut state, 2, geo());

    state.shell.drain();
    state.focus_view(Some(a), Some(SurfaceHandle(1)));

    let commands = state.shell.drain();
    assert!(commands.contains(&ShellCommand::Activated {
        surface: SurfaceHandle(2),
        active: false,
    }));
    assert!(commands.contains(&ShellCommand::KeyboardLeave {
        surface: SurfaceHandle(2),
    }));
    assert!(commands.contains(&ShellCommand::Activated {
        surface: SurfaceHandle(1),
        active: true,
    }));
    // Focus change also raises
    assert_eq!(state.views.stacking()[0], a);
}

#[test]
fn keyboard_enter_carries_pressed_keys_and_modifiers() {
    let mut state = new_state();
    add_keyboard(&mut state, 1);
    // 'a' held down while the window maps
    press_key(&mut state, 1, 30);
    state.shell.drain();

    map_view(&mut state, 1, geo());

    let commands = state.shell.drain();
    let enter = commands
        .iter()
        .find_map(|c| match c {
            ShellCommand::KeyboardEnter {
                surface, pressed, ..
            } => Some((*surface, pressed.clone())),
            _ => None,
        })
        .expect("keyboard enter sent");
    assert_eq!(enter.0, SurfaceHandle(1));
    assert_eq!(enter.1, vec![Keycode(30)]);
}

#[test]
fn no_keyboard_enter_without_a_keyboard() {
    let mut state = new_state();
    map_view(&mut state, 1, geo());
    assert!(!state
        .shell
        .commands
        .iter()
        .any(|c| matches!(c, ShellCommand::KeyboardEnter { .. })));
}

#[test]
fn cycle_with_a_single_view_is_a_noop() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    state.shell.drain();

    state.cycle_focus();

    assert_eq!(state.views.stacking(), &[a]);
    assert_eq!(state.seat.keyboard_focus.map(|f| f.view), Some(a));
    assert!(state.shell.drain().is_empty());
}

#[test]
fn cycle_walks_the_stack_round_robin() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    let b = map_view(&mut state, 2, geo());
    let c = map_view(&mut state, 3, geo());

    let original = state.views.stacking().to_vec();
    assert_eq!(original, vec![c, b, a]);

    state.cycle_focus();
    assert_eq!(state.seat.keyboard_focus.map(|f| f.view), Some(a));
    state.cycle_focus();
    assert_eq!(state.seat.keyboard_focus.map(|f| f.view), Some(b));
    state.cycle_focus();
    assert_eq!(state.seat.keyboard_focus.map(|f| f.view), Some(c));

    // N invocations for N views brings the stack back around
    assert_eq!(state.views.stacking(), original.as_slice());
}

#[test]
fn stale_focus_request_is_absorbed() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    state.destroy_surface(SurfaceHandle(1));
    state.focus_view(Some(a), Some(SurfaceHandle(1)));
    assert!(state.seat.keyboard_focus.is_none());
}

#[test]
fn selection_is_recorded_and_republished() {
    let mut state = new_state();
    state.set_selection(SelectionSource(42), 7);

    assert_eq!(
        state.seat.selection.map(|s| (s.source, s.serial)),
        Some((SelectionSource(42), 7))
    );
    assert!(state.shell.commands.contains(&ShellCommand::SelectionPublished {
        source: SelectionSource(42),
        serial: 7,
    }));
}
