//! Wavefront rings.
//!
//! Radii come from the same [`WaveGeometry`] the particle field uses, so the
//! stroke and the hit band never disagree.

use crate::clock::WaveSample;
use crate::constants::*;
use crate::easing::{clamp01, WaveGeometry};
use crate::surface::{Rgba, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleParams {
    pub rgb: [u8; 3],
    pub main_line_width: f32,
    pub main_alpha_min: f32,
    pub main_alpha_fade: f32,
    pub ambient_line_width: f32,
    pub ambient_alpha_mult: f32,
    pub calm_gate: f32,
    pub static_ring_frac: f32,
    pub static_ring_alpha: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            rgb: RIPPLE_RGB,
            main_line_width: MAIN_LINE_WIDTH,
            main_alpha_min: MAIN_ALPHA_MIN,
            main_alpha_fade: MAIN_ALPHA_FADE,
            ambient_line_width: AMBIENT_LINE_WIDTH,
            ambient_alpha_mult: AMBIENT_ALPHA_MULT,
            calm_gate: CALM_GATE,
            static_ring_frac: STATIC_RING_FRAC,
            static_ring_alpha: STATIC_RING_ALPHA,
        }
    }
}

/// Inputs for one ripple frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RippleFrame {
    pub hero: WaveSample,
    pub ambient: WaveSample,
    /// Calm level; ambient rings only appear above the gate.
    pub calm: f32,
    /// Overall layer visibility from scroll.
    pub opacity: f32,
}

pub struct WavefrontRenderer {
    params: RippleParams,
    geometry: WaveGeometry,
}

impl WavefrontRenderer {
    pub fn new(geometry: WaveGeometry) -> Self {
        Self::with_params(geometry, RippleParams::default())
    }

    pub fn with_params(geometry: WaveGeometry, params: RippleParams) -> Self {
        Self { params, geometry }
    }

    pub fn params(&self) -> &RippleParams {
        &self.params
    }

    pub fn geometry(&self) -> &WaveGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: WaveGeometry) {
        self.geometry = geometry;
    }

    #[inline]
    pub fn radius(&self, t: f32) -> f32 {
        self.geometry.radius_at(t)
    }

    pub fn hero_alpha(&self, t: f32) -> f32 {
        (1.0 - clamp01(t)) * self.params.main_alpha_fade + self.params.main_alpha_min
    }

    /// `None` while the calm gate is closed.
    pub fn ambient_alpha(&self, t: f32, calm: f32) -> Option<f32> {
        if calm <= self.params.calm_gate {
            return None;
        }
        Some((1.0 - clamp01(t)) * self.params.ambient_alpha_mult * clamp01(calm))
    }

    /// Stroke every live ring. Returns how many were drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, frame: &RippleFrame) -> usize {
        let opacity = clamp01(frame.opacity);
        if opacity <= 0.0 {
            return 0;
        }
        let c = self.geometry.center;
        let mut drawn = 0;
        if frame.hero.active {
            let a = self.hero_alpha(frame.hero.t) * opacity;
            surface.stroke_circle(
                c,
                self.radius(frame.hero.t),
                self.params.main_line_width,
                Rgba::from_rgb(self.params.rgb, a),
            );
            drawn += 1;
        }
        if frame.ambient.active {
            if let Some(a) = self.ambient_alpha(frame.ambient.t, frame.calm) {
                surface.stroke_circle(
                    c,
                    self.radius(frame.ambient.t),
                    self.params.ambient_line_width,
                    Rgba::from_rgb(self.params.rgb, a * opacity),
                );
                drawn += 1;
            }
        }
        drawn
    }

    /// Single faint ring for reduced motion.
    pub fn render_static<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = surface.size();
        let r = self.params.static_ring_frac * size.x.min(size.y);
        if r <= 0.0 {
            return;
        }
        surface.stroke_circle(
            self.geometry.center,
            r,
            self.params.main_line_width,
            Rgba::from_rgb(self.params.rgb, self.params.static_ring_alpha),
        );
    }
}
