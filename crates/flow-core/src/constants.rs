// Shared tuning constants used by both the web and the native preview frontends.
//
// Anything that feeds a wavefront radius lives here so the ring, the dots and
// the thoughts layer can never drift apart.

// Wave geometry
pub const MAX_R_DIAGONAL_MULT: f32 = 0.82; // ring reaches the screen corners

// Wave timing
pub const WAVE_DURATION_MS: f64 = 5_600.0; // how long each wave travels
pub const WAVE_INTERVAL_MS: f64 = 5_600.0; // time between ambient wave starts (equal = back-to-back)

// Hero wave trigger
pub const WAVE_TRIGGER: f32 = 0.35;
pub const WAVE_TRIGGER_HYSTERESIS: f32 = 0.06; // replay once progress drops below trigger - this

// Smoothing rates (units of progress per second)
pub const SMOOTH_RISE_PER_SEC: f32 = 0.30; // ~3.3s from 0 to 1
pub const SMOOTH_FALL_PER_SEC: f32 = 0.50; // snappier on scroll-back

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.033; // one slow frame never jumps further than this
pub const REFERENCE_FPS: f32 = 60.0; // per-frame tunings below are expressed at this rate

// Wave clock value treated as "back at the start"
pub const WAVE_RESET_EPS: f32 = 0.02;

// Particle density
pub const PARTICLE_AREA_PER_DOT: f32 = 5_200.0;
pub const PARTICLE_MIN: usize = 420;
pub const PARTICLE_MAX: usize = 650;

// Depth classes: (cumulative probability, scale)
pub const DEPTH_NEAR: (f32, f32) = (0.55, 0.6);
pub const DEPTH_MID: (f32, f32) = (0.88, 0.95);
pub const DEPTH_FAR_SCALE: f32 = 1.25;

// Particle motion
pub const TURBULENCE_ACCEL: f32 = 0.06;
pub const TURBULENCE_TIME_SCALE: f64 = 0.000_12;
pub const BASE_SPEED_CLAMP: f32 = 0.22; // times depth
pub const IMPULSE_DECAY: f32 = 0.92; // per reference frame
pub const DRIFT_DECAY: f32 = 0.985; // per reference frame
pub const MAX_IMPULSE: f32 = 7.5;
pub const MAX_DRIFT: f32 = 1.4;
pub const OUTFLOW_ACCEL: f32 = 0.018;

// Wave push
pub const HIT_BAND_PX: f32 = 70.0;
pub const PUSH_BASE: f32 = 0.9;
pub const PUSH_PROXIMITY: f32 = 1.4;
pub const PUSH_FALLOFF_PX: f32 = 900.0;
pub const PUSH_DEPTH_GAIN: f32 = 2.2;
pub const PUSH_MIN_DIST_PX: f32 = 30.0;
pub const PUSH_TANGENTIAL_STEER: f32 = 0.35;
pub const AMBIENT_PUSH_SCALE: f32 = 0.35;

// Lifecycle
pub const KILL_MARGIN_PX: f32 = 40.0; // beyond the half-diagonal
pub const RECYCLE_FADE_MS: f64 = 650.0;
pub const BORN_FADE_MS: f64 = 500.0;
pub const RESPAWN_RADIUS_FRAC: f32 = 0.12; // of min(w, h)

// Center density governor
pub const GOVERNOR_INTERVAL_MS: f64 = 500.0;
pub const GOVERNOR_INNER_FRAC: f32 = 0.22; // of min(w, h)
pub const GOVERNOR_TARGET_FILL: f32 = 0.8; // fraction of uniform-density expectation
pub const GOVERNOR_MAX_PER_PASS: usize = 12;

// Particle alpha
pub const HIT_BOOST_ALPHA: f32 = 0.22;
pub const HIT_BOOST_MS: f64 = 450.0;
pub const STATIC_PARTICLE_ALPHA: f32 = 0.12;
pub const PULSE_HZ: f64 = 0.55; // breath-like coherent shimmer

// Ripple stroke
pub const RIPPLE_RGB: [u8; 3] = [160, 220, 255];
pub const MAIN_LINE_WIDTH: f32 = 1.0;
pub const MAIN_ALPHA_MIN: f32 = 0.14;
pub const MAIN_ALPHA_FADE: f32 = 0.06;
pub const AMBIENT_LINE_WIDTH: f32 = 1.0;
pub const AMBIENT_ALPHA_MULT: f32 = 0.16;
pub const CALM_GATE: f32 = 0.15; // ambient rings show once calm exceeds this
pub const STATIC_RING_FRAC: f32 = 0.22;
pub const STATIC_RING_ALPHA: f32 = 0.08;

// Narrative
pub const BEAT_CROSSFADE_MS: f64 = 450.0;

// Thoughts
pub const THOUGHT_HIT_WIDTH_PX: f32 = 90.0;
pub const THOUGHT_PUSH_BASE_PX: f32 = 140.0;
pub const THOUGHT_PUSH_PROXIMITY_PX: f32 = 220.0;

// Entrainment field
pub const NODE_AREA_PER_DOT: f32 = 6_500.0;
pub const NODE_MIN: usize = 280;
pub const NODE_MAX: usize = 520;
pub const ENTRAIN_PULSE_HZ: f64 = 0.6;
pub const ENTRAIN_RISE_PER_SEC: f32 = 0.28; // ~3.6s to lock in
pub const ENTRAIN_FALL_PER_SEC: f32 = 0.45;
pub const ENTRAIN_FREE_SPEED: f32 = 2.4; // plus drift * ENTRAIN_FREE_SPEED_DRIFT, rad/s
pub const ENTRAIN_FREE_SPEED_DRIFT: f32 = 2.2;
pub const ENTRAIN_LOCKED_SPEED: f32 = 1.2;
pub const ENTRAIN_PULL_PER_SEC: f32 = 2.6;
pub const ENTRAIN_SPATIAL_OFFSET: f32 = 1.6;
pub const ENTRAIN_DRIFT_PX_PER_SEC: f32 = 6.0;
pub const ENTRAIN_WRAP_PX: f32 = 10.0;
pub const ENTRAIN_RING_FRAC: f32 = 0.42; // of min(w, h)
pub const ENTRAIN_STATIC_ALPHA: f32 = 0.10;
