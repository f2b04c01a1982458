//! Per-section story glue.
//!
//! A [`Scene`] owns everything one pinned section animates: the smoothing
//! controller, wave clocks, particle or node field, rings, beats and thought
//! fragments. The frontend calls [`Scene::frame`] once per animation frame;
//! all inputs are sampled once at the top so every consumer in that frame
//! sees the same scroll, viewport and clock values.

use crate::clock::{ClockConfig, ClockEvent, ClockEvents, WaveClock, WaveSample};
use crate::constants::*;
use crate::easing::{clamp01, lerp, map_range, WaveGeometry};
use crate::entrainment::EntrainmentField;
use crate::narrative::BeatTrack;
use crate::particles::{FieldParams, ParticleField, RenderInputs, StepInputs, WaveId, WaveInput};
use crate::ripples::{RippleFrame, RippleParams, WavefrontRenderer};
use crate::smoothing::{SmoothedValue, SmoothingParams};
use crate::surface::Surface;
use crate::thoughts::{ThoughtLayout, ThoughtPose};
use glam::Vec2;
use smallvec::SmallVec;

// Story curves, keyed on the hero wave clock unless noted.
const RESTLESS_STOPS: [(f32, f32); 2] = [(0.0, 1.0), (0.9, 0.0)];
const ENTRAIN_STOPS: [(f32, f32); 2] = [(0.65, 0.0), (1.0, 1.0)];
const CALM_STOPS: [(f32, f32); 2] = [(0.55, 0.0), (0.9, 1.0)];
// keyed on raw scroll progress
const WAVE_OPACITY_STOPS: [(f32, f32); 3] = [(0.28, 0.0), (0.36, 1.0), (1.0, 1.0)];
const SYNC_STOPS: [(f32, f32); 2] = [(0.1, 0.0), (0.75, 1.0)];
const PULSE_OPACITY_STOPS: [(f32, f32); 3] = [(0.15, 0.0), (0.35, 1.0), (1.0, 1.0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    PitchFlow,
    Entrainment,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub kind: SceneKind,
    pub seed: u64,
    pub smoothing: SmoothingParams,
    pub hero: ClockConfig,
    pub ambient: ClockConfig,
    pub field: FieldParams,
    pub ripples: RippleParams,
}

impl SceneConfig {
    pub fn pitch_flow(seed: u64) -> Self {
        Self {
            kind: SceneKind::PitchFlow,
            seed,
            smoothing: SmoothingParams::default(),
            hero: ClockConfig::hero(),
            ambient: ClockConfig::ambient(),
            field: FieldParams::default(),
            ripples: RippleParams::default(),
        }
    }

    pub fn entrainment(seed: u64) -> Self {
        Self {
            kind: SceneKind::Entrainment,
            smoothing: SmoothingParams {
                rise_per_sec: ENTRAIN_RISE_PER_SEC,
                fall_per_sec: ENTRAIN_FALL_PER_SEC,
            },
            ..Self::pitch_flow(seed)
        }
    }
}

/// Everything a scene reads from the outside world.
pub trait FrameSignals {
    fn scroll_progress(&self) -> f32;
    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Vec2;
    fn reduced_motion(&self) -> bool;
}

/// Fixed signals, handy for tests and scripted runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticSignals {
    pub progress: f32,
    pub viewport: Vec2,
    pub reduced_motion: bool,
}

impl FrameSignals for StaticSignals {
    fn scroll_progress(&self) -> f32 {
        self.progress
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// One frame's snapshot of the outside world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub now_ms: f64,
    pub dt_sec: f32,
    pub progress: f32,
    pub viewport: Vec2,
    pub reduced_motion: bool,
}

impl FrameInputs {
    pub fn sample<F: FrameSignals + ?Sized>(now_ms: f64, last_ms: Option<f64>, signals: &F) -> Self {
        let dt_sec = match last_ms {
            Some(last) if now_ms.is_finite() => {
                (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT_SEC)
            }
            _ => 0.0,
        };
        let progress = signals.scroll_progress();
        let viewport = signals.viewport();
        Self {
            now_ms,
            dt_sec,
            progress: if progress.is_finite() { clamp01(progress) } else { 0.0 },
            viewport: Vec2::new(sanitize_dim(viewport.x), sanitize_dim(viewport.y)),
            reduced_motion: signals.reduced_motion(),
        }
    }
}

fn sanitize_dim(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// What a frame did, for the frontend's DOM layers and for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneFrame {
    pub progress: f32,
    /// Smoothed progress (pitch flow) or smoothed sync (entrainment).
    pub smoothed: f32,
    pub hero: WaveSample,
    pub ambient: WaveSample,
    pub beat: Option<usize>,
    pub beat_changed: bool,
    pub rings: usize,
    pub drew: bool,
    pub rebuilt: bool,
}

struct PitchFlowState {
    hero: WaveClock,
    ambient: WaveClock,
    field: ParticleField,
    ripples: WavefrontRenderer,
    thoughts: ThoughtLayout,
}

struct EntrainmentState {
    field: EntrainmentField,
    pulse_opacity: f32,
}

enum Body {
    PitchFlow(Box<PitchFlowState>),
    Entrainment(EntrainmentState),
}

pub struct Scene {
    config: SceneConfig,
    viewport: Vec2,
    smoothing: SmoothedValue,
    beats: BeatTrack,
    body: Body,
    last_ms: Option<f64>,
    reduced: Option<bool>,
    static_drawn: bool,
    last_frame: SceneFrame,
}

impl Scene {
    pub fn new(config: SceneConfig, viewport: Vec2) -> Self {
        let viewport = Vec2::new(sanitize_dim(viewport.x), sanitize_dim(viewport.y));
        let (body, beats) = match config.kind {
            SceneKind::PitchFlow => {
                let geometry = WaveGeometry::for_viewport(viewport.x, viewport.y);
                let state = PitchFlowState {
                    hero: WaveClock::new(config.hero),
                    ambient: WaveClock::new(config.ambient),
                    field: ParticleField::with_params(viewport.x, viewport.y, config.seed, config.field),
                    ripples: WavefrontRenderer::with_params(geometry, config.ripples),
                    thoughts: ThoughtLayout::build(viewport.x, viewport.y),
                };
                (Body::PitchFlow(Box::new(state)), BeatTrack::pitch_flow())
            }
            SceneKind::Entrainment => (
                Body::Entrainment(EntrainmentState {
                    field: EntrainmentField::build(viewport.x, viewport.y, config.seed),
                    pulse_opacity: 0.0,
                }),
                BeatTrack::entrainment(),
            ),
        };
        log::info!(
            "[scene] {:?} mounted at {}x{}",
            config.kind,
            viewport.x,
            viewport.y
        );
        Self {
            config,
            viewport,
            smoothing: SmoothedValue::new(config.smoothing),
            beats,
            body,
            last_ms: None,
            reduced: None,
            static_drawn: false,
            last_frame: SceneFrame::default(),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.config.kind
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn beats(&self) -> &BeatTrack {
        &self.beats
    }

    pub fn last_frame(&self) -> &SceneFrame {
        &self.last_frame
    }

    pub fn particle_field(&self) -> Option<&ParticleField> {
        match &self.body {
            Body::PitchFlow(s) => Some(&s.field),
            Body::Entrainment(_) => None,
        }
    }

    pub fn entrainment_field(&self) -> Option<&EntrainmentField> {
        match &self.body {
            Body::Entrainment(s) => Some(&s.field),
            Body::PitchFlow(_) => None,
        }
    }

    pub fn ripples(&self) -> Option<&WavefrontRenderer> {
        match &self.body {
            Body::PitchFlow(s) => Some(&s.ripples),
            Body::Entrainment(_) => None,
        }
    }

    pub fn thoughts(&self) -> Option<&ThoughtLayout> {
        match &self.body {
            Body::PitchFlow(s) => Some(&s.thoughts),
            Body::Entrainment(_) => None,
        }
    }

    /// Thought fragment poses for the last frame. Empty for scenes without
    /// thoughts.
    pub fn thought_poses(&self) -> SmallVec<[ThoughtPose; 6]> {
        let reduced = self.reduced.unwrap_or(false);
        match &self.body {
            Body::PitchFlow(s) => {
                s.thoughts
                    .poses(self.last_frame.hero.t, self.last_frame.progress, reduced)
            }
            Body::Entrainment(_) => SmallVec::new(),
        }
    }

    /// Rebuild every viewport-dependent piece. Clocks and smoothing survive.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Vec2::new(sanitize_dim(width), sanitize_dim(height));
        self.viewport = viewport;
        self.static_drawn = false;
        match &mut self.body {
            Body::PitchFlow(s) => {
                s.field.rebuild(viewport.x, viewport.y);
                s.ripples
                    .set_geometry(WaveGeometry::for_viewport(viewport.x, viewport.y));
                s.thoughts = ThoughtLayout::build(viewport.x, viewport.y);
            }
            Body::Entrainment(s) => s.field.rebuild(viewport.x, viewport.y),
        }
        log::info!("[scene] {:?} rebuilt at {}x{}", self.config.kind, viewport.x, viewport.y);
    }

    /// Deterministic reduced-motion frame.
    pub fn render_static<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        match &self.body {
            Body::PitchFlow(s) => {
                s.field.render_static(surface);
                s.ripples.render_static(surface);
            }
            Body::Entrainment(s) => s.field.render_static(surface),
        }
    }

    pub fn frame<S, F>(&mut self, now_ms: f64, signals: &F, surface: &mut S) -> SceneFrame
    where
        S: Surface + ?Sized,
        F: FrameSignals + ?Sized,
    {
        let inputs = FrameInputs::sample(now_ms, self.last_ms, signals);
        let mut out = SceneFrame {
            progress: inputs.progress,
            ..SceneFrame::default()
        };

        if inputs.viewport != self.viewport {
            self.resize(inputs.viewport.x, inputs.viewport.y);
            out.rebuilt = true;
        }

        if self.reduced != Some(inputs.reduced_motion) {
            if self.reduced.is_some() {
                log::info!("[scene] reduced motion = {}", inputs.reduced_motion);
            }
            self.reduced = Some(inputs.reduced_motion);
            self.static_drawn = false;
            if inputs.reduced_motion {
                self.beats.jump(inputs.progress);
            }
        }

        if inputs.reduced_motion {
            self.last_ms = None;
            self.smoothing.snap(inputs.progress);
            out.smoothed = self.smoothing.current();
            let prev = self.beats.active();
            self.beats.jump(inputs.progress);
            out.beat = self.beats.active();
            out.beat_changed = out.beat != prev;
            if !self.static_drawn {
                self.render_static(surface);
                self.static_drawn = true;
                out.drew = true;
            }
            self.last_frame = out;
            return out;
        }

        self.last_ms = Some(inputs.now_ms);
        match &mut self.body {
            Body::PitchFlow(state) => {
                out.smoothed = self.smoothing.smooth(inputs.progress, inputs.dt_sec);
                pitch_flow_frame(state, &inputs, out.smoothed, surface, &mut out);
            }
            Body::Entrainment(state) => {
                let target = map_range(inputs.progress, &SYNC_STOPS);
                out.smoothed = self.smoothing.smooth(target, inputs.dt_sec);
                state.pulse_opacity = map_range(inputs.progress, &PULSE_OPACITY_STOPS);
                state.field.step(inputs.dt_sec, out.smoothed, inputs.now_ms);
                surface.clear();
                state.field.render(surface, state.pulse_opacity);
                out.rings = usize::from(state.pulse_opacity > 0.0);
            }
        }
        out.drew = true;

        let changed = self.beats.update(inputs.progress, inputs.now_ms);
        out.beat = self.beats.active();
        out.beat_changed = changed.is_some();
        self.last_frame = out;
        out
    }

    pub fn beat_opacity(&self, index: usize, now_ms: f64) -> f32 {
        self.beats
            .opacity(index, now_ms, self.reduced.unwrap_or(false))
    }
}

fn log_clock_events(name: &str, events: &ClockEvents) {
    for e in events {
        match e {
            ClockEvent::Triggered { at_ms } => log::info!("[{}] triggered at {:.0}ms", name, at_ms),
            ClockEvent::Started { phase_index, .. } if *phase_index == 0 => {
                log::info!("[{}] wave started", name)
            }
            ClockEvent::Started { phase_index, .. } => {
                log::debug!("[{}] wave {} started", name, phase_index)
            }
            ClockEvent::Reset => log::info!("[{}] reset", name),
        }
    }
}

fn pitch_flow_frame<S: Surface + ?Sized>(
    s: &mut PitchFlowState,
    inputs: &FrameInputs,
    smoothed: f32,
    surface: &mut S,
    out: &mut SceneFrame,
) {
    let now = inputs.now_ms;
    // The trigger reads raw progress; smoothing only shapes the look.
    log_clock_events("hero", &s.hero.update(inputs.progress, now));
    log_clock_events("ambient", &s.ambient.update(inputs.progress, now));
    let hero = s.hero.sample();
    let ambient = s.ambient.sample();

    let wave_t = hero.t;
    let restless = map_range(wave_t, &RESTLESS_STOPS);
    let entrain = map_range(wave_t, &ENTRAIN_STOPS);
    let calm = map_range(wave_t, &CALM_STOPS);
    let opacity = map_range(inputs.progress, &WAVE_OPACITY_STOPS);

    let speed_mul = lerp(1.05, 0.35, clamp01(smoothed / 0.7));
    let base_alpha = lerp(0.19, 0.09, clamp01(smoothed / 0.85));
    let turbulence = lerp(1.35, 0.05, clamp01(1.0 - restless + 0.8 * entrain));

    let gate = s.ripples.params().calm_gate;
    let wave = if ambient.active && calm > gate {
        WaveInput {
            id: Some(WaveId {
                ambient: true,
                index: ambient.phase_index,
            }),
            t: ambient.t,
            radius: s.field.wave_radius(ambient.t),
            active: true,
            push_scale: AMBIENT_PUSH_SCALE,
        }
    } else if hero.started {
        WaveInput {
            id: Some(WaveId {
                ambient: false,
                index: hero.phase_index,
            }),
            t: hero.t,
            radius: s.field.wave_radius(hero.t),
            active: hero.active,
            push_scale: 1.0,
        }
    } else {
        WaveInput::NONE
    };

    s.field.step(&StepInputs {
        dt_sec: inputs.dt_sec,
        wave,
        turbulence,
        speed_mul,
        outflow: entrain,
        now_ms: now,
    });

    surface.clear();
    s.field.render(
        surface,
        &RenderInputs {
            base_alpha,
            restless,
            entrain,
            now_ms: now,
        },
    );
    out.rings = s.ripples.render(
        surface,
        &RippleFrame {
            hero,
            ambient,
            calm,
            opacity,
        },
    );
    out.hero = hero;
    out.ambient = ambient;
}
