//! Scroll position → normalized progress through a pinned section.
//!
//! Progress is 0 when the section's top reaches the viewport top and 1 when
//! its bottom reaches the viewport bottom.

/// Raw measurements needed to place the viewport inside a pinned section.
/// All values are CSS pixels in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_y: f64,
    pub section_top: f64,
    pub section_height: f64,
    pub viewport_height: f64,
}

/// Normalized progress in [0, 1].
///
/// A section that is not taller than the viewport has no scrollable range;
/// progress is then held at a boundary (0 before the section start, 1 at or
/// after it) instead of dividing by zero.
pub fn scroll_progress(g: &ScrollGeometry) -> f32 {
    let start = g.section_top;
    let range = g.section_height - g.viewport_height;
    if !g.scroll_y.is_finite() || !start.is_finite() {
        return 0.0;
    }
    if !range.is_finite() || range <= 0.0 {
        return if g.scroll_y >= start { 1.0 } else { 0.0 };
    }
    (((g.scroll_y - start) / range).clamp(0.0, 1.0)) as f32
}

/// Holds the latest progress for one section.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollSignal {
    value: f32,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Recompute from fresh measurements. Returns `true` when the value moved.
    pub fn update(&mut self, g: &ScrollGeometry) -> bool {
        let next = scroll_progress(g);
        let changed = next != self.value;
        self.value = next;
        changed
    }
}
