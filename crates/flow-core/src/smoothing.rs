//! Rate-limited follower for scroll-derived targets.
//!
//! Scroll can jump discontinuously (wheel flicks, anchor links); the visuals
//! should not. `SmoothedValue` moves toward its target no faster than a fixed
//! rate per second, with separate rates for rising and falling targets.

use crate::constants::{SMOOTH_FALL_PER_SEC, SMOOTH_RISE_PER_SEC};
use crate::easing::clamp01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingParams {
    pub rise_per_sec: f32,
    pub fall_per_sec: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            rise_per_sec: SMOOTH_RISE_PER_SEC,
            fall_per_sec: SMOOTH_FALL_PER_SEC,
        }
    }
}

impl SmoothingParams {
    #[inline]
    pub fn max_rate(&self) -> f32 {
        self.rise_per_sec.max(self.fall_per_sec)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    params: SmoothingParams,
}

impl SmoothedValue {
    pub fn new(params: SmoothingParams) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            params,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn params(&self) -> SmoothingParams {
        self.params
    }

    /// Jump straight to `v` (used for reduced motion and rebuilds).
    pub fn snap(&mut self, v: f32) {
        self.current = clamp01(v);
        self.target = self.current;
    }

    /// Advance one frame toward `target`. Call once per animation frame.
    pub fn smooth(&mut self, target: f32, dt_sec: f32) -> f32 {
        if target.is_finite() {
            self.target = clamp01(target);
        }
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        let cur = self.current;
        let next = if self.target > cur {
            (cur + self.params.rise_per_sec.max(0.0) * dt).min(self.target)
        } else if self.target < cur {
            (cur - self.params.fall_per_sec.max(0.0) * dt).max(self.target)
        } else {
            cur
        };
        self.current = clamp01(next);
        self.current
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(SmoothingParams::default())
    }
}
