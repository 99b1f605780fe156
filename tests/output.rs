//! Output hotplug: placement, removal and backend commands

mod common;

use cairn::backend::{OutputHandle, OutputMode};
use cairn::event::OutputEvent;
use cairn::geometry::{Rect, Size};
use cairn::headless::BackendCommand;
use common::new_state;

#[test]
fn added_outputs_are_enabled_and_placed_left_to_right() {
    let mut state = new_state();
    state.backend.modes.insert(
        OutputHandle(2),
        OutputMode {
            size: Size::new(1280, 720),
            refresh_mhz: 60_000,
        },
    );

    let a = state.add_output(OutputHandle(1)).expect("enabled");
    let b = state.add_output(OutputHandle(2)).expect("enabled");

    assert_eq!(
        state.outputs.get(a).unwrap().rect,
        Rect::new(0, 0, 1920, 1080)
    );
    assert_eq!(
        state.outputs.get(b).unwrap().rect,
        Rect::new(1920, 0, 1280, 720)
    );
    assert_eq!(
        state.backend.commands,
        vec![
            BackendCommand::OutputEnabled(OutputHandle(1)),
            BackendCommand::OutputEnabled(OutputHandle(2)),
        ]
    );
}

#[test]
fn removal_disables_and_scrubs_the_placement() {
    let mut state = new_state();
    state.handle_output_event(OutputEvent::Added {
        handle: OutputHandle(1),
    });
    state.handle_output_event(OutputEvent::Added {
        handle: OutputHandle(2),
    });

    state.handle_output_event(OutputEvent::Removed {
        handle: OutputHandle(1),
    });

    assert_eq!(state.outputs.len(), 1);
    assert!(state
        .backend
        .commands
        .contains(&BackendCommand::OutputDisabled(OutputHandle(1))));
    // Absolute mapping now spans only the remaining output
    state.on_pointer_motion_absolute(1.0, 1.0, 0);
    assert_eq!((state.cursor.x, state.cursor.y), (3840.0, 1080.0));
}

#[test]
fn removing_an_unknown_output_is_absorbed() {
    let mut state = new_state();
    state.handle_output_event(OutputEvent::Removed {
        handle: OutputHandle(9),
    });
    assert!(state.outputs.is_empty());
    assert!(state.backend.commands.is_empty());
}
