//! Particle field simulation.
//!
//! A fixed-capacity set of dots that starts out restless (turbulent, noisy
//! alpha) and is pushed outward by each passing wavefront. Dots that drift
//! past the kill radius fade out and are reseeded near the center in the same
//! slot, so the population never changes between builds.
//!
//! Motion tunings are expressed per reference frame (60 fps) and scaled by
//! the real frame time, so the field looks the same at 30 or 144 Hz.

use crate::constants::*;
use crate::easing::{clamp01, lerp, WaveGeometry};
use crate::surface::{Rgba, Surface};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthClass {
    Near,
    Mid,
    Far,
}

impl DepthClass {
    fn pick(r: f32) -> Self {
        if r < DEPTH_NEAR.0 {
            DepthClass::Near
        } else if r < DEPTH_MID.0 {
            DepthClass::Mid
        } else {
            DepthClass::Far
        }
    }

    /// Visual weight: deeper dots are drawn larger.
    pub fn size_scale(self) -> f32 {
        match self {
            DepthClass::Near => DEPTH_NEAR.1,
            DepthClass::Mid => DEPTH_MID.1,
            DepthClass::Far => DEPTH_FAR_SCALE,
        }
    }

    /// Heavier dots move slower and take smaller pushes.
    pub fn speed_scale(self) -> f32 {
        match self {
            DepthClass::Near => DEPTH_FAR_SCALE,
            DepthClass::Mid => DEPTH_MID.1,
            DepthClass::Far => DEPTH_NEAR.1,
        }
    }

    pub fn alpha_scale(self) -> f32 {
        match self {
            DepthClass::Near => 0.85,
            DepthClass::Mid => 1.0,
            DepthClass::Far => 1.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecycleWindow {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl RecycleWindow {
    /// 1 at window start, 0 at window end.
    fn remaining(&self, now_ms: f64) -> f32 {
        let span = (self.end_ms - self.start_ms).max(1.0);
        1.0 - ((now_ms - self.start_ms) / span).clamp(0.0, 1.0) as f32
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub size: f32,
    pub depth: DepthClass,
    pub vel: Vec2,
    pub impulse: Vec2,
    pub drift: Vec2,
    pub spin: f32,
    pub hit: bool,
    pub hit_at_ms: f64,
    pub born_at_ms: f64,
    pub recycle: Option<RecycleWindow>,
}

impl Particle {
    #[inline]
    pub fn is_recycling(&self) -> bool {
        self.recycle.is_some()
    }

    /// Open a fade-out window. A particle already fading is left alone until
    /// its window completes; returns whether a new window was opened.
    pub fn begin_recycle(&mut self, now_ms: f64, fade_ms: f64) -> bool {
        if self.recycle.is_some() {
            return false;
        }
        self.recycle = Some(RecycleWindow {
            start_ms: now_ms,
            end_ms: now_ms + fade_ms.max(0.0),
        });
        true
    }

    fn apply_wave_push(&mut self, center: Vec2, push_scale: f32, steer: f32, now_ms: f64) {
        let d = self.pos - center;
        let raw = d.length();
        let dist = raw.max(PUSH_MIN_DIST_PX);
        let u = if raw > f32::EPSILON {
            d / raw
        } else {
            Vec2::new(self.spin, 0.0)
        };
        let strength = PUSH_BASE + PUSH_PROXIMITY * (1.0 - clamp01(dist / PUSH_FALLOFF_PX));
        let impulse = strength * self.depth.speed_scale() * PUSH_DEPTH_GAIN * push_scale;
        let tangent = u.perp() * self.spin;
        self.impulse += u * impulse + tangent * impulse * steer;
        self.impulse = self.impulse.clamp_length_max(MAX_IMPULSE);
        self.hit = true;
        self.hit_at_ms = now_ms;
    }
}

/// Identifies one wave cycle so hit flags can be cleared when a new one begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveId {
    pub ambient: bool,
    pub index: u32,
}

/// Wavefront state handed to the field for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveInput {
    pub id: Option<WaveId>,
    pub t: f32,
    pub radius: f32,
    pub active: bool,
    pub push_scale: f32,
}

impl WaveInput {
    pub const NONE: WaveInput = WaveInput {
        id: None,
        t: 0.0,
        radius: 0.0,
        active: false,
        push_scale: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepInputs {
    pub dt_sec: f32,
    pub wave: WaveInput,
    /// ~1.35 while restless, ~0.05 once calm.
    pub turbulence: f32,
    pub speed_mul: f32,
    /// 0..1 strength of the organized outward current.
    pub outflow: f32,
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInputs {
    pub base_alpha: f32,
    /// 1 = restless, 0 = calm.
    pub restless: f32,
    /// 0 = noisy shimmer, 1 = coherent pulse.
    pub entrain: f32,
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub min_count: usize,
    pub max_count: usize,
    pub area_per_dot: f32,
    pub hit_band_px: f32,
    pub tangential_steer: f32,
    pub kill_margin_px: f32,
    pub recycle_fade_ms: f64,
    pub born_fade_ms: f64,
    pub respawn_radius_frac: f32,
    pub governor_interval_ms: f64,
    pub governor_inner_frac: f32,
    pub governor_target_fill: f32,
    pub governor_max_per_pass: usize,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            min_count: PARTICLE_MIN,
            max_count: PARTICLE_MAX,
            area_per_dot: PARTICLE_AREA_PER_DOT,
            hit_band_px: HIT_BAND_PX,
            tangential_steer: PUSH_TANGENTIAL_STEER,
            kill_margin_px: KILL_MARGIN_PX,
            recycle_fade_ms: RECYCLE_FADE_MS,
            born_fade_ms: BORN_FADE_MS,
            respawn_radius_frac: RESPAWN_RADIUS_FRAC,
            governor_interval_ms: GOVERNOR_INTERVAL_MS,
            governor_inner_frac: GOVERNOR_INNER_FRAC,
            governor_target_fill: GOVERNOR_TARGET_FILL,
            governor_max_per_pass: GOVERNOR_MAX_PER_PASS,
        }
    }
}

impl FieldParams {
    /// Particle count for a viewport: proportional to area, clamped to the
    /// configured bounds. Degenerate viewports get the minimum.
    pub fn capacity_for(&self, width: f32, height: f32) -> usize {
        let lo = self.min_count.min(self.max_count);
        let hi = self.max_count.max(self.min_count);
        let area = width.max(0.0) * height.max(0.0);
        if !area.is_finite() || self.area_per_dot <= 0.0 {
            return lo;
        }
        ((area / self.area_per_dot).floor() as usize).clamp(lo, hi)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub in_center: usize,
    pub recycling: usize,
    pub hit: usize,
}

pub struct ParticleField {
    params: FieldParams,
    width: f32,
    height: f32,
    geometry: WaveGeometry,
    particles: Vec<Particle>,
    rng: StdRng,
    last_wave: Option<WaveId>,
    // Clock has moved past the reset epsilon since flags were last cleared.
    wave_armed: bool,
    next_governor_ms: f64,
}

impl ParticleField {
    pub fn build(width: f32, height: f32, seed: u64) -> Self {
        Self::with_params(width, height, seed, FieldParams::default())
    }

    pub fn with_params(width: f32, height: f32, seed: u64, params: FieldParams) -> Self {
        let mut field = Self {
            params,
            width: 0.0,
            height: 0.0,
            geometry: WaveGeometry::for_viewport(0.0, 0.0),
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            last_wave: None,
            wave_armed: false,
            next_governor_ms: 0.0,
        };
        field.rebuild(width, height);
        field
    }

    /// Throw the population away and seed a new one for a new viewport.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.geometry = WaveGeometry::for_viewport(self.width, self.height);
        let count = self.params.capacity_for(self.width, self.height);
        let (w, h) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| {
                let depth = DepthClass::pick(rng.gen::<f32>());
                let pos = Vec2::new(rng.gen::<f32>() * w, rng.gen::<f32>() * h);
                let size = (0.6 + rng.gen::<f32>() * 1.2) * depth.size_scale();
                let spin = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                Particle {
                    pos,
                    size,
                    depth,
                    vel: random_velocity(rng, depth),
                    impulse: Vec2::ZERO,
                    drift: Vec2::ZERO,
                    spin,
                    hit: false,
                    hit_at_ms: f64::NEG_INFINITY,
                    born_at_ms: f64::NEG_INFINITY,
                    recycle: None,
                }
            })
            .collect();
        self.last_wave = None;
        self.wave_armed = false;
        log::debug!("[field] built {} particles for {}x{}", count, w, h);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn geometry(&self) -> &WaveGeometry {
        &self.geometry
    }

    /// Radius the hit test uses for a wave clock value.
    #[inline]
    pub fn wave_radius(&self, t: f32) -> f32 {
        self.geometry.radius_at(t)
    }

    #[inline]
    pub fn kill_radius(&self) -> f32 {
        0.5 * self.width.hypot(self.height) + self.params.kill_margin_px
    }

    pub fn stats(&self) -> FieldStats {
        let inner = self.inner_radius();
        let c = self.geometry.center;
        FieldStats {
            count: self.particles.len(),
            in_center: self
                .particles
                .iter()
                .filter(|p| !p.is_recycling() && p.pos.distance(c) < inner)
                .count(),
            recycling: self.particles.iter().filter(|p| p.is_recycling()).count(),
            hit: self.particles.iter().filter(|p| p.hit).count(),
        }
    }

    fn inner_radius(&self) -> f32 {
        self.params.governor_inner_frac * self.width.min(self.height)
    }

    pub fn step(&mut self, inputs: &StepInputs) {
        let dt = if inputs.dt_sec.is_finite() {
            inputs.dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        let f = dt * REFERENCE_FPS;
        let now = inputs.now_ms;
        let wave = inputs.wave;

        let rewound = self.wave_armed && wave.t < WAVE_RESET_EPS;
        if wave.id != self.last_wave || rewound {
            for p in &mut self.particles {
                p.hit = false;
            }
            self.last_wave = wave.id;
        }
        self.wave_armed = wave.t >= WAVE_RESET_EPS;

        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        let center = self.geometry.center;
        let kill = self.kill_radius();
        let band = self.params.hit_band_px;
        let steer = self.params.tangential_steer;
        let fade_ms = self.params.recycle_fade_ms;
        let impulse_decay = IMPULSE_DECAY.powf(f);
        let drift_decay = DRIFT_DECAY.powf(f);
        let tt = ((now * TURBULENCE_TIME_SCALE).fract()) as f32;
        let turb = inputs.turbulence.max(0.0);
        let outflow = clamp01(inputs.outflow);

        for i in 0..self.particles.len() {
            if let Some(window) = self.particles[i].recycle {
                if now >= window.end_ms {
                    self.respawn(i, now);
                    continue;
                }
            }
            let p = &mut self.particles[i];

            // (a) turbulence
            let nx = p.pos.x / w;
            let ny = p.pos.y / h;
            let swirl = ((nx * 10.0 + tt) * TAU).sin() * ((ny * 8.0 - tt) * TAU).cos();
            let ax = ((ny * 7.0 + tt) * TAU).cos() * turb * TURBULENCE_ACCEL * swirl;
            let ay = ((nx * 9.0 - tt) * TAU).sin() * turb * TURBULENCE_ACCEL * swirl;
            p.vel += Vec2::new(ax, ay) * f;
            let max_base = BASE_SPEED_CLAMP * p.depth.speed_scale();
            p.vel = p.vel.clamp(Vec2::splat(-max_base), Vec2::splat(max_base));

            // (b) wavefront push, once per wave
            if wave.active && !p.hit && !p.is_recycling() {
                let dist = p.pos.distance(center);
                if (dist - wave.radius).abs() <= band {
                    p.apply_wave_push(center, wave.push_scale, steer, now);
                }
            }

            // (c) decay
            p.impulse *= impulse_decay;
            p.drift *= drift_decay;

            // (f) organized outflow once the story has calmed
            if outflow > 0.0 {
                let d = p.pos - center;
                let len = d.length();
                if len > f32::EPSILON {
                    p.drift += d / len * OUTFLOW_ACCEL * outflow * p.depth.speed_scale() * f;
                    p.drift = p.drift.clamp_length_max(MAX_DRIFT);
                }
            }

            // (d) integrate
            p.pos += (p.vel * inputs.speed_mul + p.impulse + p.drift) * f;

            // (e) fade out beyond the kill radius, reseed later
            if p.pos.distance(center) > kill {
                p.begin_recycle(now, fade_ms);
            }
        }

        if now >= self.next_governor_ms {
            self.next_governor_ms = now + self.params.governor_interval_ms;
            self.govern_density(now);
        }
    }

    /// Recycle far outliers toward the center when the middle has thinned
    /// out. Returns how many particles were scheduled.
    pub fn govern_density(&mut self, now_ms: f64) -> usize {
        let n = self.particles.len();
        let area = self.width * self.height;
        if n == 0 || area <= 0.0 {
            return 0;
        }
        let inner = self.inner_radius();
        let center = self.geometry.center;
        let inside = self
            .particles
            .iter()
            .filter(|p| !p.is_recycling() && p.pos.distance(center) < inner)
            .count();
        let expected = (n as f32 * std::f32::consts::PI * inner * inner / area).min(n as f32);
        let target = expected * self.params.governor_target_fill;
        if inside as f32 >= target {
            return 0;
        }
        let deficit = ((target - inside as f32).ceil() as usize).min(self.params.governor_max_per_pass);
        let far_limit = 0.6 * 0.5 * self.width.hypot(self.height);
        let mut candidates: Vec<(usize, f32)> = self
            .particles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_recycling())
            .map(|(i, p)| (i, p.pos.distance(center)))
            .filter(|&(_, d)| d > far_limit)
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        let fade_ms = self.params.recycle_fade_ms;
        let mut scheduled = 0;
        for (i, _) in candidates.into_iter().take(deficit) {
            if self.particles[i].begin_recycle(now_ms, fade_ms) {
                scheduled += 1;
            }
        }
        if scheduled > 0 {
            log::debug!(
                "[field] governor: {} inside (target {:.0}), recycling {}",
                inside,
                target,
                scheduled
            );
        }
        scheduled
    }

    fn respawn(&mut self, i: usize, now_ms: f64) {
        let center = self.geometry.center;
        let radius = self.params.respawn_radius_frac * self.width.min(self.height);
        let angle = self.rng.gen::<f32>() * TAU;
        let r = self.rng.gen::<f32>().sqrt() * radius;
        let depth = self.particles[i].depth;
        let vel = random_velocity(&mut self.rng, depth);
        let p = &mut self.particles[i];
        p.pos = center + Vec2::new(angle.cos(), angle.sin()) * r;
        p.vel = vel;
        p.impulse = Vec2::ZERO;
        p.drift = Vec2::ZERO;
        p.hit = false;
        p.hit_at_ms = f64::NEG_INFINITY;
        p.born_at_ms = now_ms;
        p.recycle = None;
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, inputs: &RenderInputs) {
        let now = inputs.now_ms;
        let pulse = ((now / 1000.0 * std::f64::consts::TAU * PULSE_HZ).sin() * 0.5 + 0.5) as f32;
        let coherent = 0.85 + 0.35 * pulse;
        let entrain = clamp01(inputs.entrain);
        let calm_lift = 0.9 + 0.1 * (1.0 - clamp01(inputs.restless));
        let born_fade_ms = self.params.born_fade_ms.max(1.0);

        for p in &self.particles {
            let noisy = 0.75 + self.rng.gen::<f32>() * 0.45;
            let variance = lerp(noisy, coherent, entrain);
            let born = ((now - p.born_at_ms) / born_fade_ms).clamp(0.0, 1.0) as f32;
            let fade = p.recycle.map(|w| w.remaining(now)).unwrap_or(1.0);
            let boost = if p.hit {
                HIT_BOOST_ALPHA
                    * (1.0 - ((now - p.hit_at_ms) / HIT_BOOST_MS).clamp(0.0, 1.0) as f32)
            } else {
                0.0
            };
            let alpha = (inputs.base_alpha * variance * calm_lift * p.depth.alpha_scale() + boost)
                * born
                * fade;
            if alpha <= 0.001 {
                continue;
            }
            surface.fill_circle(p.pos, p.size, Rgba::white(alpha.min(1.0)));
        }
    }

    /// Reduced-motion frame: every dot at a fixed alpha, no randomness.
    pub fn render_static<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, Rgba::white(STATIC_PARTICLE_ALPHA));
        }
    }
}

fn random_velocity(rng: &mut StdRng, depth: DepthClass) -> Vec2 {
    let speed = (0.02 + rng.gen::<f32>() * 0.05) * depth.speed_scale();
    let dir = rng.gen::<f32>() * TAU;
    Vec2::new(dir.cos(), dir.sin()) * speed
}
