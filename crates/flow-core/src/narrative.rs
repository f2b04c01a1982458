//! Narrative beats.
//!
//! A track holds the beats of one section, ordered by activation threshold.
//! Exactly one beat is active at a time: the last one whose threshold the
//! signal has reached. Switching beats crossfades the outgoing and incoming
//! text over a fixed window, starting from whatever opacity each beat had at
//! the switch.

use crate::constants::BEAT_CROSSFADE_MS;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct Beat {
    pub threshold: f32,
    pub text: &'static str,
}

impl Beat {
    pub const fn new(threshold: f32, text: &'static str) -> Self {
        Self { threshold, text }
    }
}

pub const PITCH_FLOW_BEATS: [Beat; 4] = [
    Beat::new(0.0, "Your mind doesn’t get a break anymore."),
    Beat::new(
        0.38,
        "The fastest way to calm the mind is to give it a rhythm to follow.",
    ),
    Beat::new(0.72, "Your brain follows rhythm."),
    Beat::new(0.92, "Calm isn’t a switch. It’s a shift."),
];

pub const ENTRAINMENT_BEATS: [Beat; 3] = [
    Beat::new(0.0, "Your brain follows rhythm."),
    Beat::new(0.30, "A gentle signal. A calmer pace."),
    Beat::new(0.55, "This is brainwave entrainment — made wearable."),
];

#[derive(Clone, Debug)]
pub struct BeatTrack {
    beats: SmallVec<[Beat; 4]>,
    crossfade_ms: f64,
    active: Option<usize>,
    /// Opacity of each beat at `changed_at_ms`.
    levels: SmallVec<[f32; 4]>,
    changed_at_ms: f64,
}

impl BeatTrack {
    pub fn new(beats: impl IntoIterator<Item = Beat>) -> Self {
        let mut beats: SmallVec<[Beat; 4]> = beats.into_iter().collect();
        beats.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        let levels = beats.iter().map(|_| 0.0).collect();
        Self {
            beats,
            crossfade_ms: BEAT_CROSSFADE_MS,
            active: None,
            levels,
            changed_at_ms: f64::NEG_INFINITY,
        }
    }

    pub fn pitch_flow() -> Self {
        Self::new(PITCH_FLOW_BEATS)
    }

    pub fn entrainment() -> Self {
        Self::new(ENTRAINMENT_BEATS)
    }

    pub fn with_crossfade_ms(mut self, ms: f64) -> Self {
        self.crossfade_ms = ms.max(0.0);
        self
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Index of the last beat whose threshold is at or below `signal`.
    pub fn active_index(&self, signal: f32) -> Option<usize> {
        if signal.is_nan() {
            return None;
        }
        self.beats.iter().rposition(|b| b.threshold <= signal)
    }

    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Track a new signal value. Returns the new active beat when it changed.
    pub fn update(&mut self, signal: f32, now_ms: f64) -> Option<usize> {
        let next = self.active_index(signal);
        if next == self.active {
            return None;
        }
        self.levels = (0..self.beats.len())
            .map(|i| self.level(i, now_ms))
            .collect();
        self.active = next;
        self.changed_at_ms = now_ms;
        if let Some(i) = next {
            log::info!("[beats] beat {} active at signal {:.2}", i, signal);
        }
        next
    }

    /// Snap the active beat without a crossfade.
    pub fn jump(&mut self, signal: f32) {
        self.active = self.active_index(signal);
        for (i, level) in self.levels.iter_mut().enumerate() {
            *level = if self.active == Some(i) { 1.0 } else { 0.0 };
        }
        self.changed_at_ms = f64::NEG_INFINITY;
    }

    pub fn opacity(&self, index: usize, now_ms: f64, reduced_motion: bool) -> f32 {
        if reduced_motion {
            return if self.active == Some(index) { 1.0 } else { 0.0 };
        }
        self.level(index, now_ms)
    }

    /// The active beat rises and every other beat falls at one crossfade
    /// per full swing.
    fn level(&self, index: usize, now_ms: f64) -> f32 {
        let start = self.levels.get(index).copied().unwrap_or(0.0);
        let step = if self.crossfade_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.changed_at_ms) / self.crossfade_ms).clamp(0.0, 1.0) as f32
        };
        if self.active == Some(index) {
            (start + step).min(1.0)
        } else {
            (start - step).max(0.0)
        }
    }
}
