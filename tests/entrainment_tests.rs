// Host-side tests for the neural entrainment field.

use flow_core::entrainment::{node_count, EntrainmentField};
use flow_core::{RecordingSurface, OP_FILL_CIRCLE};

const DT: f32 = 1.0 / 60.0;

fn run(sync: f32, seconds: u32) -> EntrainmentField {
    let mut field = EntrainmentField::build(1024.0, 768.0, 99);
    for frame in 0..seconds * 60 {
        field.step(DT, sync, frame as f64 * 1000.0 / 60.0);
    }
    field
}

#[test]
fn node_count_scales_and_clamps() {
    assert_eq!(node_count(800.0, 600.0), 280);
    assert_eq!(node_count(1920.0, 1080.0), 319);
    assert_eq!(node_count(3840.0, 2160.0), 520);
    assert_eq!(node_count(0.0, 0.0), 280);
}

#[test]
fn locking_raises_coherence() {
    let free = run(0.0, 10).coherence();
    let locked = run(1.0, 10).coherence();
    assert!(locked > 0.9, "locked coherence {}", locked);
    assert!(free < 0.5, "free coherence {}", free);
}

#[test]
fn nodes_stay_near_the_viewport() {
    let field = run(0.3, 20);
    for n in field.nodes() {
        assert!(n.pos.x >= -10.5 && n.pos.x <= 1034.5);
        assert!(n.pos.y >= -10.5 && n.pos.y <= 778.5);
        assert!((0.0..=std::f32::consts::TAU).contains(&n.phase));
    }
}

#[test]
fn static_frame_draws_every_node_at_fixed_alpha() {
    let field = EntrainmentField::build(1024.0, 768.0, 1);
    let mut a = RecordingSurface::new(1024.0, 768.0);
    let mut b = RecordingSurface::new(1024.0, 768.0);
    field.render_static(&mut a);
    field.render_static(&mut b);
    assert_eq!(a.count(OP_FILL_CIRCLE), field.len());
    assert_eq!(a.as_bytes(), b.as_bytes());
}
