// Host-side tests for the scroll smoothing controller.

use flow_core::{SmoothedValue, SmoothingParams};

const DT: f32 = 1.0 / 60.0;

#[test]
fn rise_never_exceeds_rate_or_target() {
    let params = SmoothingParams::default();
    let mut s = SmoothedValue::new(params);
    let mut prev = s.current();
    for _ in 0..600 {
        let v = s.smooth(1.0, DT);
        assert!(v - prev <= params.rise_per_sec * DT + 1e-6);
        assert!(v <= 1.0);
        prev = v;
    }
    assert!((prev - 1.0).abs() < 1e-6, "should settle on the target");
}

#[test]
fn fall_uses_its_own_rate() {
    let params = SmoothingParams {
        rise_per_sec: 0.3,
        fall_per_sec: 0.5,
    };
    let mut s = SmoothedValue::new(params);
    s.snap(1.0);
    let v = s.smooth(0.0, 0.1);
    assert!((v - 0.95).abs() < 1e-6);
}

#[test]
fn output_stays_in_unit_range() {
    let mut s = SmoothedValue::default();
    for target in [2.0, -1.0, 0.4, 7.5, f32::NAN, 0.0] {
        for _ in 0..30 {
            let v = s.smooth(target, 0.2);
            assert!((0.0..=1.0).contains(&v), "{} out of range", v);
        }
    }
}

#[test]
fn bad_dt_does_not_move_the_value() {
    let mut s = SmoothedValue::default();
    s.snap(0.5);
    assert_eq!(s.smooth(1.0, f32::NAN), 0.5);
    assert_eq!(s.smooth(1.0, -1.0), 0.5);
}

#[test]
fn nan_target_holds_previous_target() {
    let mut s = SmoothedValue::default();
    s.smooth(0.6, DT);
    let before = s.target();
    s.smooth(f32::NAN, DT);
    assert_eq!(s.target(), before);
}
