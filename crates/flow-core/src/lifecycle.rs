//! Page lifecycle gate for the frame loops.
//!
//! One gate per page. The loops run only while the document is visible, the
//! page is not parked in the back/forward cache, reduced motion is off and
//! the page has not been unloaded.

/// What a `pagehide` means for the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Going into the back/forward cache; keep everything, pause loops.
    Cached,
    /// Really leaving; drop loops and listeners.
    Unloaded,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopGate {
    hidden: bool,
    cached: bool,
    reduced_motion: bool,
    unloaded: bool,
}

impl LoopGate {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    #[inline]
    pub fn should_run(&self) -> bool {
        !(self.hidden || self.cached || self.reduced_motion || self.unloaded)
    }

    #[inline]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    #[inline]
    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Returns true when the preference actually changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        let changed = self.reduced_motion != reduced;
        self.reduced_motion = reduced;
        changed
    }

    pub fn page_hide(&mut self, persisted: bool) -> PageHide {
        if persisted {
            self.cached = true;
            log::info!("[lifecycle] page cached");
            PageHide::Cached
        } else {
            self.unloaded = true;
            log::info!("[lifecycle] page unloaded");
            PageHide::Unloaded
        }
    }

    /// A `pageshow`. Returns true when the page came back from the cache.
    pub fn page_show(&mut self, persisted: bool) -> bool {
        let restored = persisted && self.cached && !self.unloaded;
        self.cached = false;
        if restored {
            log::info!("[lifecycle] page restored from cache");
        }
        restored
    }
}
