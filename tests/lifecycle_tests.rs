// Host-side tests for the page lifecycle gate.

use flow_core::{LoopGate, PageHide};

#[test]
fn runs_only_when_visible_and_motion_allowed() {
    let mut gate = LoopGate::new(false);
    assert!(gate.should_run());
    gate.set_hidden(true);
    assert!(!gate.should_run());
    gate.set_hidden(false);
    assert!(gate.set_reduced_motion(true));
    assert!(!gate.set_reduced_motion(true));
    assert!(!gate.should_run());
    assert!(LoopGate::new(true).reduced_motion());
}

#[test]
fn back_forward_cache_pauses_and_restores() {
    let mut gate = LoopGate::new(false);
    assert_eq!(gate.page_hide(true), PageHide::Cached);
    assert!(!gate.should_run());
    assert!(!gate.is_unloaded());

    assert!(gate.page_show(true));
    assert!(gate.should_run());
}

#[test]
fn real_unload_never_restarts() {
    let mut gate = LoopGate::new(false);
    assert_eq!(gate.page_hide(false), PageHide::Unloaded);
    assert!(gate.is_unloaded());
    assert!(!gate.page_show(true));
    assert!(!gate.should_run());
}

#[test]
fn first_page_show_is_not_a_restore() {
    let mut gate = LoopGate::new(false);
    assert!(!gate.page_show(false));
    assert!(gate.should_run());
}

#[test]
fn restore_keeps_reduced_motion_static() {
    let mut gate = LoopGate::new(true);
    gate.page_hide(true);
    assert!(gate.page_show(true));
    assert!(!gate.should_run());
    assert!(gate.reduced_motion());
}
