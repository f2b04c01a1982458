//! Neural entrainment field.
//!
//! Nodes flicker independently at first. As `sync` rises they slow down and
//! are pulled onto a shared global phase (plus a small spatial offset), so
//! the shimmer turns into one coherent breathing pulse.

use crate::constants::*;
use crate::easing::{clamp01, lerp};
use crate::surface::{Rgba, Surface};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Vec2,
    pub base_r: f32,
    /// Current phase, kept in [0, TAU).
    pub phase: f32,
    pub target_phase: f32,
    pub drift: f32,
}

pub struct EntrainmentField {
    width: f32,
    height: f32,
    nodes: Vec<Node>,
    rng: StdRng,
    sync: f32,
    global_phase: f32,
}

pub fn node_count(width: f32, height: f32) -> usize {
    let area = width.max(0.0) * height.max(0.0);
    if !area.is_finite() {
        return NODE_MIN;
    }
    ((area / NODE_AREA_PER_DOT).floor() as usize).clamp(NODE_MIN, NODE_MAX)
}

/// Shortest signed angle from `from` to `to`.
#[inline]
fn wrap_angle(from: f32, to: f32) -> f32 {
    (to - from + PI).rem_euclid(TAU) - PI
}

impl EntrainmentField {
    pub fn build(width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            nodes: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            sync: 0.0,
            global_phase: 0.0,
        };
        field.rebuild(width, height);
        field
    }

    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let (w, h) = (self.width, self.height);
        let count = node_count(w, h);
        let rng = &mut self.rng;
        self.nodes = (0..count)
            .map(|_| Node {
                pos: Vec2::new(rng.gen::<f32>() * w, rng.gen::<f32>() * h),
                base_r: 0.8 + rng.gen::<f32>() * 1.6,
                phase: rng.gen::<f32>() * TAU,
                target_phase: 0.0,
                drift: 0.25 + rng.gen::<f32>() * 0.75,
            })
            .collect();
        log::debug!("[entrainment] built {} nodes for {}x{}", count, w, h);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn sync(&self) -> f32 {
        self.sync
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn step(&mut self, dt_sec: f32, sync: f32, now_ms: f64) {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        let s = clamp01(sync);
        self.sync = s;
        self.global_phase = ((now_ms / 1000.0 * std::f64::consts::TAU * ENTRAIN_PULSE_HZ)
            .rem_euclid(std::f64::consts::TAU)) as f32;

        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        let c = self.center();
        let g = self.global_phase;
        let wrap = ENTRAIN_WRAP_PX;
        let pull = clamp01(ENTRAIN_PULL_PER_SEC * s * dt);

        for n in &mut self.nodes {
            let a = n.phase + g;
            let k = ENTRAIN_DRIFT_PX_PER_SEC * n.drift * dt * (1.0 - 0.7 * s);
            n.pos += Vec2::new(a.sin(), a.cos()) * k;

            if n.pos.x < -wrap {
                n.pos.x = self.width + wrap;
            } else if n.pos.x > self.width + wrap {
                n.pos.x = -wrap;
            }
            if n.pos.y < -wrap {
                n.pos.y = self.height + wrap;
            } else if n.pos.y > self.height + wrap {
                n.pos.y = -wrap;
            }

            let offset = ((n.pos.x - c.x) / w + (n.pos.y - c.y) / h) * ENTRAIN_SPATIAL_OFFSET;
            n.target_phase = (g + offset).rem_euclid(TAU);

            let free = ENTRAIN_FREE_SPEED + n.drift * ENTRAIN_FREE_SPEED_DRIFT;
            n.phase += lerp(free, ENTRAIN_LOCKED_SPEED, s) * dt;
            n.phase += wrap_angle(n.phase, n.target_phase) * pull;
            n.phase = n.phase.rem_euclid(TAU);
        }
    }

    /// Phase coherence against each node's locked target, in [0, 1]:
    /// near 0 for independent nodes, 1 when every node keeps the same lag.
    pub fn coherence(&self) -> f32 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let sum = self.nodes.iter().fold(Vec2::ZERO, |acc, n| {
            let d = n.phase - n.target_phase;
            acc + Vec2::new(d.cos(), d.sin())
        });
        sum.length() / self.nodes.len() as f32
    }

    pub fn ring_radius(&self) -> f32 {
        let ring_t = self.global_phase.sin() * 0.5 + 0.5;
        self.width.min(self.height) * ENTRAIN_RING_FRAC * (0.3 + 0.7 * ring_t)
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, pulse_opacity: f32) {
        let ring_t = self.global_phase.sin() * 0.5 + 0.5;
        let ring_alpha = (0.06 + 0.10 * ring_t) * clamp01(pulse_opacity);
        if ring_alpha > 0.001 {
            surface.stroke_circle(
                self.center(),
                self.ring_radius(),
                1.0,
                Rgba::from_rgb(RIPPLE_RGB, ring_alpha),
            );
        }

        let s = self.sync;
        for n in &self.nodes {
            let noisy = self.rng.gen::<f32>();
            let coherent = n.target_phase.sin() * 0.5 + 0.5;
            let shimmer = lerp(noisy, coherent, s);
            let alpha = lerp(0.06, 0.14, shimmer) * (0.85 + 0.15 * s);
            surface.fill_circle(n.pos, n.base_r, Rgba::white(alpha));
        }
    }

    pub fn render_static<S: Surface + ?Sized>(&self, surface: &mut S) {
        for n in &self.nodes {
            surface.fill_circle(n.pos, n.base_r, Rgba::white(ENTRAIN_STATIC_ALPHA));
        }
    }
}
