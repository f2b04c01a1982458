// Host-side tests for the intrusive thought fragments.

use flow_core::thoughts::THOUGHTS;
use flow_core::{ThoughtLayout, WaveGeometry};
use glam::Vec2;

#[test]
fn layout_places_every_fragment_at_its_anchor() {
    let layout = ThoughtLayout::build(1200.0, 800.0);
    assert_eq!(layout.len(), THOUGHTS.len());
    let first = &layout.items()[0];
    assert_eq!(first.pos, Vec2::new(0.12 * 1200.0, 0.18 * 800.0));
    assert!((first.unit.length() - 1.0).abs() < 1e-5);
}

#[test]
fn fragments_move_only_after_the_ring_passes() {
    let layout = ThoughtLayout::build(1200.0, 800.0);
    let geometry = WaveGeometry::for_viewport(1200.0, 800.0);
    for (i, item) in layout.items().iter().enumerate() {
        // find the last clock value where the ring is still short of the fragment
        let mut t_before = 0.0;
        for step in 0..=1000 {
            let t = step as f32 / 1000.0;
            if geometry.radius_at(t) < item.dist {
                t_before = t;
            }
        }
        let before = layout.pose(i, t_before, 0.5, false);
        assert_eq!(before.offset, Vec2::ZERO, "fragment {} moved early", i);
        assert_eq!(layout.hit(i, t_before), 0.0);

        let after = layout.pose(i, 1.0, 0.5, false);
        let proximity = 1.0 - (item.dist / 900.0).clamp(0.0, 1.0);
        let expected = 140.0 + 220.0 * proximity;
        assert!((after.offset.length() - expected).abs() < 1e-2);
        assert!(after.offset.dot(item.unit) > 0.0, "pushed outward");
        assert_eq!(after.opacity, 0.0);
    }
}

#[test]
fn reduced_motion_never_pushes() {
    let layout = ThoughtLayout::build(1200.0, 800.0);
    for pose in layout.poses(1.0, 0.5, true) {
        assert_eq!(pose.offset, Vec2::ZERO);
        assert!(pose.opacity > 0.0);
    }
}

#[test]
fn layer_fades_as_the_wave_travels() {
    let layout = ThoughtLayout::build(1200.0, 800.0);
    let early = layout.pose(0, 0.0, 0.5, false).opacity;
    let late = layout.pose(0, 0.55, 0.5, false).opacity;
    assert!(early > 0.7);
    assert_eq!(late, 0.0);
}
