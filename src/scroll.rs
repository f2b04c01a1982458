use crate::dom;
use flow_core::{scroll_progress, FrameSignals, LoopGate, ScrollGeometry};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Read the pinned section's placement relative to the document.
pub fn measure(window: &web::Window, section: &web::HtmlElement) -> ScrollGeometry {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let rect = section.get_bounding_client_rect();
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    ScrollGeometry {
        scroll_y,
        section_top: rect.top() + scroll_y,
        section_height: rect.height(),
        viewport_height,
    }
}

/// Live DOM signals for one section.
pub struct DomSignals {
    pub window: web::Window,
    pub section: web::HtmlElement,
    pub gate: Rc<Cell<LoopGate>>,
}

impl FrameSignals for DomSignals {
    fn scroll_progress(&self) -> f32 {
        scroll_progress(&measure(&self.window, &self.section))
    }

    fn viewport(&self) -> Vec2 {
        let (w, h) = dom::viewport_size(&self.window);
        Vec2::new(w, h)
    }

    fn reduced_motion(&self) -> bool {
        self.gate.get().reduced_motion()
    }
}
