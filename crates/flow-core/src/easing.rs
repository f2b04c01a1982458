//! Easing, interpolation and the shared wavefront geometry.
//!
//! Every consumer that turns a wave clock value into a radius goes through
//! [`WaveGeometry::radius_at`]. The ring, the particle hit test and the
//! thoughts layer must agree to the pixel, so none of them may roll their own.

use crate::constants::MAX_R_DIAGONAL_MULT;
use glam::Vec2;

#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Raised-cosine ease: `0.5 - 0.5 * cos(pi * t)`, input clamped to [0, 1].
#[inline]
pub fn ease_in_out_cos(t: f32) -> f32 {
    0.5 - 0.5 * (std::f32::consts::PI * clamp01(t)).cos()
}

/// Convert wave progress (0..1) into radius progress (0..1).
#[inline]
pub fn wave_radius_progress(t: f32) -> f32 {
    ease_in_out_cos(t)
}

/// Piecewise-linear map of `v` through `(input, output)` stops.
///
/// Values outside the first/last stop clamp to the first/last output. Stops
/// must be sorted by input; an empty slice maps everything to 0.
pub fn map_range(v: f32, stops: &[(f32, f32)]) -> f32 {
    let Some(&(first_in, first_out)) = stops.first() else {
        return 0.0;
    };
    if v <= first_in || v.is_nan() {
        return first_out;
    }
    for pair in stops.windows(2) {
        let (a_in, a_out) = pair[0];
        let (b_in, b_out) = pair[1];
        if v <= b_in {
            let span = b_in - a_in;
            if span <= f32::EPSILON {
                return b_out;
            }
            return lerp(a_out, b_out, (v - a_in) / span);
        }
    }
    stops[stops.len() - 1].1
}

/// Center and maximum radius of the wavefront for one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveGeometry {
    pub center: Vec2,
    pub max_radius: f32,
}

impl WaveGeometry {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let w = width.max(0.0);
        let h = height.max(0.0);
        Self {
            center: Vec2::new(w * 0.5, h * 0.5),
            max_radius: w.hypot(h) * MAX_R_DIAGONAL_MULT,
        }
    }

    /// Ring radius for a wave clock value in [0, 1].
    #[inline]
    pub fn radius_at(&self, t: f32) -> f32 {
        self.max_radius * wave_radius_progress(t)
    }
}
