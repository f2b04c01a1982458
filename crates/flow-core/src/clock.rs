//! Wave clock / metronome.
//!
//! A clock turns a scroll threshold crossing into a time-based 0→1 ramp that
//! runs on its own, independent of further scrolling. One-shot clocks play a
//! single wave and hold at 1; repeating clocks start a new wave every
//! interval. Scrolling back below `trigger - hysteresis` rewinds to `Idle` so
//! the whole narrative replays identically on re-entry.

use crate::constants::{WAVE_DURATION_MS, WAVE_INTERVAL_MS, WAVE_TRIGGER, WAVE_TRIGGER_HYSTERESIS};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockMode {
    OneShot,
    Repeating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockConfig {
    pub trigger: f32,
    pub hysteresis: f32,
    pub duration_ms: f64,
    pub interval_ms: f64,
    /// Delay between the trigger firing and the first wave starting.
    pub start_offset_ms: f64,
    pub mode: ClockMode,
}

impl ClockConfig {
    /// The single narrative wave that fires when the trigger is crossed.
    pub fn hero() -> Self {
        Self {
            trigger: WAVE_TRIGGER,
            hysteresis: WAVE_TRIGGER_HYSTERESIS,
            duration_ms: WAVE_DURATION_MS,
            interval_ms: WAVE_INTERVAL_MS,
            start_offset_ms: 0.0,
            mode: ClockMode::OneShot,
        }
    }

    /// Repeating calm ripples. Shares the hero trigger; the first ambient
    /// wave starts one interval after the hero so they run back-to-back.
    pub fn ambient() -> Self {
        Self {
            start_offset_ms: WAVE_INTERVAL_MS,
            mode: ClockMode::Repeating,
            ..Self::hero()
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::hero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    Idle,
    Armed,
    Traveling,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveState {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub phase_index: u32,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClockEvent {
    /// Idle → Armed: the trigger threshold was crossed upward.
    Triggered { at_ms: f64 },
    /// Armed/Traveling → Traveling with a fresh wave.
    Started { phase_index: u32, start_ms: f64 },
    /// Back to Idle after scrolling above the trigger region.
    Reset,
}

pub type ClockEvents = SmallVec<[ClockEvent; 2]>;

/// One frame's view of a clock, held constant for the whole frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveSample {
    pub t: f32,
    pub active: bool,
    pub phase_index: u32,
    /// Whether any wave has started since the last reset.
    pub started: bool,
}

#[derive(Clone, Debug)]
pub struct WaveClock {
    config: ClockConfig,
    phase: WavePhase,
    prev_progress: f32,
    last_now_ms: f64,
    next_start_ms: f64,
    state: Option<WaveState>,
    value: f32,
}

impl WaveClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            phase: WavePhase::Idle,
            prev_progress: 0.0,
            last_now_ms: f64::NEG_INFINITY,
            next_start_ms: f64::INFINITY,
            state: None,
            value: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> Option<&WaveState> {
        self.state.as_ref()
    }

    /// Clock value of the current wave in [0, 1]; 0 while idle or armed.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn sample(&self) -> WaveSample {
        WaveSample {
            t: self.value,
            active: self.state.map(|s| s.active).unwrap_or(false),
            phase_index: self.state.map(|s| s.phase_index).unwrap_or(0),
            started: self.state.is_some(),
        }
    }

    /// Rewind to `Idle`, dropping any wave in flight.
    pub fn reset(&mut self) {
        self.phase = WavePhase::Idle;
        self.next_start_ms = f64::INFINITY;
        self.state = None;
        self.value = 0.0;
    }

    /// Feed this frame's scroll progress and wall-clock time.
    pub fn update(&mut self, progress: f32, now_ms: f64) -> ClockEvents {
        let mut events = ClockEvents::new();
        // Frame timestamps are monotonic; guard anyway so `t` never runs backwards.
        let now = if now_ms.is_finite() {
            now_ms.max(self.last_now_ms)
        } else {
            self.last_now_ms.max(0.0)
        };
        self.last_now_ms = now;
        let progress = if progress.is_finite() {
            progress
        } else {
            self.prev_progress
        };

        let c = self.config;
        if self.phase != WavePhase::Idle && progress < c.trigger - c.hysteresis {
            self.reset();
            events.push(ClockEvent::Reset);
        }

        if self.phase == WavePhase::Idle && self.prev_progress < c.trigger && progress >= c.trigger
        {
            self.phase = WavePhase::Armed;
            self.next_start_ms = now + c.start_offset_ms.max(0.0);
            events.push(ClockEvent::Triggered { at_ms: now });
        }
        self.prev_progress = progress;

        if matches!(self.phase, WavePhase::Armed | WavePhase::Traveling)
            && now >= self.next_start_ms
        {
            let mut started: Option<(f64, u32)> = None;
            match c.mode {
                ClockMode::OneShot => {
                    if self.phase == WavePhase::Armed {
                        started = Some((self.next_start_ms, 0));
                        self.next_start_ms = f64::INFINITY;
                    }
                }
                ClockMode::Repeating => {
                    // Loop rather than step once so skipped frames never drift the grid.
                    let interval = c.interval_ms.max(1.0);
                    let mut index = self.state.map(|s| s.phase_index + 1).unwrap_or(0);
                    while now >= self.next_start_ms {
                        if let Some((_, prev)) = started {
                            index = prev + 1;
                        }
                        started = Some((self.next_start_ms, index));
                        self.next_start_ms += interval;
                    }
                }
            }
            if let Some((start_ms, phase_index)) = started {
                self.state = Some(WaveState {
                    start_ms,
                    duration_ms: c.duration_ms,
                    phase_index,
                    active: true,
                });
                self.phase = WavePhase::Traveling;
                events.push(ClockEvent::Started {
                    phase_index,
                    start_ms,
                });
            }
        }

        self.value = 0.0;
        if let Some(s) = self.state.as_mut() {
            let duration = s.duration_ms.max(1.0);
            let elapsed = now - s.start_ms;
            self.value = (elapsed / duration).clamp(0.0, 1.0) as f32;
            s.active = elapsed < duration;
            if c.mode == ClockMode::OneShot && !s.active {
                self.phase = WavePhase::Complete;
            }
        }
        events
    }
}
