// Host-side tests for scene orchestration.

use flow_core::{
    RecordingSurface, Scene, SceneConfig, SceneKind, StaticSignals, OP_CLEAR, OP_FILL_CIRCLE,
    OP_STROKE_CIRCLE,
};
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn signals(progress: f32, reduced_motion: bool) -> StaticSignals {
    StaticSignals {
        progress,
        viewport: Vec2::new(1280.0, 800.0),
        reduced_motion,
    }
}

fn pitch_flow() -> Scene {
    Scene::new(SceneConfig::pitch_flow(42), Vec2::new(1280.0, 800.0))
}

#[test]
fn reduced_motion_frames_are_byte_identical() {
    let mut a = pitch_flow();
    let mut b = pitch_flow();
    let mut sa = RecordingSurface::new(1280.0, 800.0);
    let mut sb = RecordingSurface::new(1280.0, 800.0);
    a.frame(0.0, &signals(0.5, true), &mut sa);
    b.frame(9_999.0, &signals(0.5, true), &mut sb);
    assert!(!sa.ops().is_empty());
    assert_eq!(sa.as_bytes(), sb.as_bytes());
    assert_eq!(sa.count(OP_STROKE_CIRCLE), 1, "one static ring");
}

#[test]
fn reduced_motion_draws_once_until_resized() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    assert!(scene.frame(0.0, &signals(0.2, true), &mut surface).drew);
    let ops = surface.ops().len();
    for i in 1..10 {
        let out = scene.frame(i as f64 * FRAME_MS, &signals(0.6, true), &mut surface);
        assert!(!out.drew);
    }
    assert_eq!(surface.ops().len(), ops);

    let resized = StaticSignals {
        viewport: Vec2::new(900.0, 700.0),
        ..signals(0.6, true)
    };
    let out = scene.frame(500.0, &resized, &mut surface);
    assert!(out.rebuilt && out.drew);
}

#[test]
fn reduced_motion_still_tracks_beats() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    let out = scene.frame(0.0, &signals(0.75, true), &mut surface);
    assert_eq!(out.beat, Some(2));
    assert_eq!(scene.beat_opacity(2, 0.0), 1.0);
    assert_eq!(scene.beat_opacity(1, 0.0), 0.0);
}

#[test]
fn trigger_scenario_fires_and_replays() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    let mut now = 0.0;
    let mut frame = |scene: &mut Scene, p: f32| {
        now += FRAME_MS;
        scene.frame(now, &signals(p, false), &mut surface)
    };

    assert!(!frame(&mut scene, 0.30).hero.started);
    let out = frame(&mut scene, 0.40);
    assert!(out.hero.started && out.hero.active);
    assert_eq!(out.hero.t, 0.0);

    let mut last = 0.0;
    for _ in 0..120 {
        let out = frame(&mut scene, 0.40);
        assert!(out.hero.t >= last);
        last = out.hero.t;
    }
    assert!(last > 0.3);

    let out = frame(&mut scene, 0.25);
    assert!(!out.hero.started);
    assert_eq!(out.hero.t, 0.0);

    let out = frame(&mut scene, 0.40);
    assert!(out.hero.started);
    assert_eq!(out.hero.t, 0.0);
}

#[test]
fn animated_frame_clears_then_draws_the_field_and_ring() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    scene.frame(0.0, &signals(0.30, false), &mut surface);
    scene.frame(FRAME_MS, &signals(0.40, false), &mut surface);
    surface.reset();
    let out = scene.frame(2.0 * FRAME_MS, &signals(0.40, false), &mut surface);
    assert_eq!(surface.ops()[0].kind, OP_CLEAR);
    assert_eq!(out.rings, 1);
    assert_eq!(surface.count(OP_STROKE_CIRCLE), 1);
    assert!(surface.count(OP_FILL_CIRCLE) > 0);
}

#[test]
fn ring_radius_tracks_the_field_after_resize() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    let resized = StaticSignals {
        viewport: Vec2::new(640.0, 900.0),
        ..signals(0.1, false)
    };
    let out = scene.frame(0.0, &resized, &mut surface);
    assert!(out.rebuilt);
    let ripples = scene.ripples().expect("pitch flow has ripples");
    let field = scene.particle_field().expect("pitch flow has a field");
    for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
        assert_eq!(ripples.radius(t), field.wave_radius(t));
    }
    assert_eq!(scene.viewport(), Vec2::new(640.0, 900.0));
}

#[test]
fn smoothed_progress_lags_raw_progress() {
    let mut scene = pitch_flow();
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    scene.frame(0.0, &signals(0.0, false), &mut surface);
    let out = scene.frame(FRAME_MS, &signals(1.0, false), &mut surface);
    assert_eq!(out.progress, 1.0);
    assert!(out.smoothed < 0.05);
}

#[test]
fn entrainment_scene_has_no_wave_layers() {
    let mut scene = Scene::new(SceneConfig::entrainment(7), Vec2::new(1280.0, 800.0));
    assert_eq!(scene.kind(), SceneKind::Entrainment);
    assert!(scene.particle_field().is_none());
    assert!(scene.thought_poses().is_empty());
    let mut surface = RecordingSurface::new(1280.0, 800.0);
    let out = scene.frame(0.0, &signals(0.5, false), &mut surface);
    assert!(out.drew);
    let nodes = scene.entrainment_field().map(|f| f.len()).unwrap_or(0);
    assert_eq!(surface.count(OP_FILL_CIRCLE), nodes);
    assert_eq!(out.beat, Some(1));
}
