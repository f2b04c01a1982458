//! Page-level "immersive" flag.
//!
//! Each pinned section reports its own scroll progress; the page is immersive
//! while any of them is strictly inside its range. The header only reads the
//! flag, so sections never need to know about each other.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub u32);

#[derive(Clone, Debug, Default)]
pub struct ImmersiveMode {
    sections: FnvHashMap<SectionId, bool>,
}

impl ImmersiveMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: SectionId) {
        self.sections.entry(id).or_insert(false);
    }

    /// Record a section's progress. Returns `true` when the page-level flag
    /// flipped.
    pub fn report(&mut self, id: SectionId, progress: f32) -> bool {
        let before = self.is_active();
        let inside = progress > 0.0 && progress < 1.0;
        self.sections.insert(id, inside);
        let after = self.is_active();
        if before != after {
            log::info!("[immersive] {}", if after { "entered" } else { "left" });
        }
        before != after
    }

    /// Forget a section. Returns `true` when the page-level flag flipped.
    pub fn unmount(&mut self, id: SectionId) -> bool {
        let before = self.is_active();
        self.sections.remove(&id);
        before != self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.sections.values().any(|&v| v)
    }

    pub fn section_active(&self, id: SectionId) -> bool {
        self.sections.get(&id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
