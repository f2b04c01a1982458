//! Intrusive thought fragments that the wavefront sweeps off screen.
//!
//! Each fragment sits at a fixed fractional anchor. Once the ring has passed
//! it, the fragment slides outward along its direction from the center and
//! fades. The radius comes from the shared [`WaveGeometry`].

use crate::constants::{THOUGHT_HIT_WIDTH_PX, THOUGHT_PUSH_BASE_PX, THOUGHT_PUSH_PROXIMITY_PX, PUSH_FALLOFF_PX};
use crate::easing::{clamp01, map_range, WaveGeometry};
use glam::Vec2;
use smallvec::SmallVec;

pub const THOUGHTS: [(&str, Vec2); 6] = [
    ("one more thing…", Vec2::new(0.12, 0.18)),
    ("did I reply?", Vec2::new(0.82, 0.22)),
    ("tomorrow…", Vec2::new(0.10, 0.55)),
    ("just check this…", Vec2::new(0.86, 0.58)),
    ("what if…", Vec2::new(0.18, 0.78)),
    ("don’t forget…", Vec2::new(0.78, 0.82)),
];

const HIT_FADE: [(f32, f32); 3] = [(0.0, 1.0), (0.35, 0.55), (1.0, 0.0)];
const LAYER_FADE: [(f32, f32); 3] = [(0.0, 1.0), (0.25, 1.0), (0.55, 0.0)];
const BASE_FADE: [(f32, f32); 2] = [(0.0, 0.65), (0.1, 0.8)];

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedThought {
    pub text: &'static str,
    pub pos: Vec2,
    pub dist: f32,
    pub unit: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThoughtPose {
    /// Displacement from the anchor in CSS pixels.
    pub offset: Vec2,
    pub opacity: f32,
}

pub struct ThoughtLayout {
    geometry: WaveGeometry,
    items: SmallVec<[PlacedThought; 6]>,
}

impl ThoughtLayout {
    pub fn build(width: f32, height: f32) -> Self {
        let geometry = WaveGeometry::for_viewport(width, height);
        let size = Vec2::new(width.max(0.0), height.max(0.0));
        let items = THOUGHTS
            .iter()
            .map(|&(text, anchor)| {
                let pos = anchor * size;
                let d = pos - geometry.center;
                let dist = d.length().max(1.0);
                PlacedThought {
                    text,
                    pos,
                    dist,
                    unit: d / dist,
                }
            })
            .collect();
        Self { geometry, items }
    }

    pub fn items(&self) -> &[PlacedThought] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 0 until the ring reaches the fragment, 1 once it is a hit width past.
    pub fn hit(&self, index: usize, wave_t: f32) -> f32 {
        let Some(item) = self.items.get(index) else {
            return 0.0;
        };
        let r = self.geometry.radius_at(wave_t);
        clamp01((r - item.dist) / THOUGHT_HIT_WIDTH_PX)
    }

    pub fn pose(&self, index: usize, wave_t: f32, scroll: f32, reduced_motion: bool) -> ThoughtPose {
        let Some(item) = self.items.get(index) else {
            return ThoughtPose::default();
        };
        let base = map_range(scroll, &BASE_FADE);
        if reduced_motion {
            return ThoughtPose {
                offset: Vec2::ZERO,
                opacity: base,
            };
        }
        let hit = self.hit(index, wave_t);
        let proximity = 1.0 - clamp01(item.dist / PUSH_FALLOFF_PX);
        let strength = (THOUGHT_PUSH_BASE_PX + THOUGHT_PUSH_PROXIMITY_PX * proximity) * hit;
        ThoughtPose {
            offset: item.unit * strength,
            opacity: base * map_range(hit, &HIT_FADE) * map_range(wave_t, &LAYER_FADE),
        }
    }

    pub fn poses(&self, wave_t: f32, scroll: f32, reduced_motion: bool) -> SmallVec<[ThoughtPose; 6]> {
        (0..self.items.len())
            .map(|i| self.pose(i, wave_t, scroll, reduced_motion))
            .collect()
    }
}
