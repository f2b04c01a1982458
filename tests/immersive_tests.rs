// Host-side tests for the page-level immersive flag.

use flow_core::{ImmersiveMode, SectionId};

const HERO: SectionId = SectionId(0);
const SYNC: SectionId = SectionId(1);

#[test]
fn active_only_strictly_inside_a_section() {
    let mut mode = ImmersiveMode::new();
    mode.register(HERO);
    assert!(!mode.is_active());
    assert!(!mode.report(HERO, 0.0));
    assert!(mode.report(HERO, 0.01));
    assert!(mode.is_active());
    assert!(mode.report(HERO, 1.0));
    assert!(!mode.is_active());
}

#[test]
fn any_section_keeps_the_page_immersive() {
    let mut mode = ImmersiveMode::new();
    mode.register(HERO);
    mode.register(SYNC);
    mode.report(HERO, 0.5);
    assert!(!mode.report(SYNC, 0.3));
    assert!(!mode.report(HERO, 1.0));
    assert!(mode.is_active());
    assert!(mode.section_active(SYNC));
    assert!(!mode.section_active(HERO));
}

#[test]
fn unmount_clears_the_section() {
    let mut mode = ImmersiveMode::new();
    mode.register(SYNC);
    mode.report(SYNC, 0.4);
    assert!(mode.unmount(SYNC));
    assert!(!mode.is_active());
    assert!(mode.is_empty());
}
