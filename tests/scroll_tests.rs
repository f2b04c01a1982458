// Host-side tests for scroll progress measurement.

use flow_core::{scroll_progress, ScrollGeometry, ScrollSignal};

fn geometry(scroll_y: f64) -> ScrollGeometry {
    ScrollGeometry {
        scroll_y,
        section_top: 1000.0,
        section_height: 3000.0,
        viewport_height: 1000.0,
    }
}

#[test]
fn progress_is_linear_through_the_section() {
    assert_eq!(scroll_progress(&geometry(1000.0)), 0.0);
    assert!((scroll_progress(&geometry(2000.0)) - 0.5).abs() < 1e-6);
    assert_eq!(scroll_progress(&geometry(3000.0)), 1.0);
}

#[test]
fn progress_clamps_outside_the_section() {
    assert_eq!(scroll_progress(&geometry(0.0)), 0.0);
    assert_eq!(scroll_progress(&geometry(9000.0)), 1.0);
}

#[test]
fn section_no_taller_than_viewport_holds_a_boundary() {
    let mut g = ScrollGeometry {
        scroll_y: 500.0,
        section_top: 1000.0,
        section_height: 800.0,
        viewport_height: 800.0,
    };
    assert_eq!(scroll_progress(&g), 0.0);
    g.scroll_y = 1000.0;
    assert_eq!(scroll_progress(&g), 1.0);
    g.section_height = 0.0;
    let p = scroll_progress(&g);
    assert!(p.is_finite());
}

#[test]
fn signal_reports_changes() {
    let mut s = ScrollSignal::new();
    assert!(!s.update(&geometry(0.0)));
    assert!(s.update(&geometry(2000.0)));
    assert!(!s.update(&geometry(2000.0)));
    assert!((s.value() - 0.5).abs() < 1e-6);
}
