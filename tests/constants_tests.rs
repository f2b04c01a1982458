// Host-side tests for constants and their relationships.
// The web crate is wasm-only, so its page constants are included directly.

#![allow(dead_code)]
mod page {
    include!("../src/constants.rs");
}

use flow_core::constants::*;
use page::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn wave_timing_is_back_to_back() {
    assert!(WAVE_DURATION_MS > 0.0);
    assert_eq!(WAVE_DURATION_MS, WAVE_INTERVAL_MS);
    assert!(WAVE_TRIGGER > WAVE_TRIGGER_HYSTERESIS);
    assert!(WAVE_TRIGGER < 1.0);
    assert!(WAVE_RESET_EPS > 0.0 && WAVE_RESET_EPS < 0.1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn depth_classes_are_ordered() {
    assert!(DEPTH_NEAR.0 < DEPTH_MID.0 && DEPTH_MID.0 < 1.0);
    assert!(DEPTH_NEAR.1 < DEPTH_MID.1 && DEPTH_MID.1 < DEPTH_FAR_SCALE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn densities_and_decays_are_sane() {
    assert!(PARTICLE_MIN <= PARTICLE_MAX);
    assert!(NODE_MIN <= NODE_MAX);
    assert!(IMPULSE_DECAY > 0.0 && IMPULSE_DECAY < 1.0);
    assert!(DRIFT_DECAY > 0.0 && DRIFT_DECAY < 1.0);
    assert!(SMOOTH_RISE_PER_SEC > 0.0 && SMOOTH_FALL_PER_SEC > 0.0);
    assert!(CALM_GATE > 0.0 && CALM_GATE < 1.0);
    assert!(GOVERNOR_TARGET_FILL > 0.0 && GOVERNOR_TARGET_FILL <= 1.0);
    assert!(RESPAWN_RADIUS_FRAC < GOVERNOR_INNER_FRAC);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn page_hooks_are_distinct() {
    assert_ne!(PITCH_FLOW_SECTION_ID, ENTRAINMENT_SECTION_ID);
    assert_ne!(PITCH_FLOW_SEED, ENTRAINMENT_SEED);
    assert!(REDUCED_MOTION_QUERY.contains("reduce"));
    assert!(WAITLIST_ENDPOINT.starts_with('/'));
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
}
