//! Stacking-order invariants under map/unmap/destroy and raise

mod common;

use cairn::geometry::Rect;
use cairn::shell::SurfaceHandle;
use common::{map_view, new_state};

fn geo() -> Rect {
    Rect::new(0, 0, 100, 100)
}

#[test]
fn stacking_holds_exactly_the_mapped_views() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    let b = map_view(&mut state, 2, geo());
    let c = map_view(&mut state, 3, geo());

    // Newest in front, each exactly once
    assert_eq!(state.views.stacking(), &[c, b, a]);

    state.unmap_surface(SurfaceHandle(2));
    assert_eq!(state.views.stacking(), &[c, a]);
    assert!(!state.views.get(b).unwrap().mapped);

    state.destroy_surface(SurfaceHandle(3));
    assert_eq!(state.views.stacking(), &[a]);
    assert!(state.views.get(c).is_none());

    state.destroy_surface(SurfaceHandle(1));
    state.destroy_surface(SurfaceHandle(2));
    assert!(state.views.stacking().is_empty());
    assert!(state.views.is_empty());
}

#[test]
fn remapping_a_surface_keeps_its_identity() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    map_view(&mut state, 2, geo());

    state.unmap_surface(SurfaceHandle(1));
    assert_eq!(state.views.stacking().len(), 1);

    let again = map_view(&mut state, 1, geo());
    assert_eq!(a, again);
    assert_eq!(state.views.stacking()[0], a);
}

#[test]
fn raise_is_idempotent_at_the_front() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    let b = map_view(&mut state, 2, geo());

    assert_eq!(state.views.stacking(), &[b, a]);
    state.raise_view(b);
    assert_eq!(state.views.stacking(), &[b, a]);

    state.raise_view(a);
    assert_eq!(state.views.stacking(), &[a, b]);
}

#[test]
fn raise_of_a_destroyed_view_is_absorbed() {
    let mut state = new_state();
    let a = map_view(&mut state, 1, geo());
    state.destroy_surface(SurfaceHandle(1));
    // Stale raise from upstream must be a no-op, not a fault
    state.raise_view(a);
    assert!(state.views.stacking().is_empty());
}

#[test]
fn unmap_of_unknown_surface_is_absorbed() {
    let mut state = new_state();
    state.unmap_surface(SurfaceHandle(99));
    state.destroy_surface(SurfaceHandle(99));
    assert!(state.views.is_empty());
}

#[test]
fn destroyed_view_no_longer_hits() {
    let mut state = new_state();
    map_view(&mut state, 1, geo());
    assert!(state.hit_test(50.0, 50.0).is_some());

    state.destroy_surface(SurfaceHandle(1));
    assert!(state.hit_test(50.0, 50.0).is_none());
}

#[test]
fn unmapped_view_no_longer_hits() {
    let mut state = new_state();
    map_view(&mut state, 1, geo());
    state.unmap_surface(SurfaceHandle(1));
    assert!(state.hit_test(50.0, 50.0).is_none());
}
