use crate::constants::{BEAT_SELECTOR, THOUGHT_SELECTOR};
use crate::dom;
use flow_core::Scene;
use web_sys as web;

/// DOM text that follows a scene: narrative beats and thought fragments.
pub struct TextLayers {
    beats: Vec<web::HtmlElement>,
    thoughts: Vec<web::HtmlElement>,
}

impl TextLayers {
    pub fn collect(section: &web::Element) -> Self {
        let beats = dom::query_all(section, BEAT_SELECTOR);
        let thoughts = dom::query_all(section, THOUGHT_SELECTOR);
        log::info!(
            "[layers] {} beats, {} thoughts in #{}",
            beats.len(),
            thoughts.len(),
            section.id()
        );
        Self { beats, thoughts }
    }

    pub fn apply(&self, scene: &Scene, now_ms: f64) {
        for (i, el) in self.beats.iter().enumerate() {
            let a = scene.beat_opacity(i, now_ms);
            dom::set_style(el, "opacity", &format!("{:.3}", a));
            _ = el.set_attribute("aria-hidden", if a > 0.5 { "false" } else { "true" });
        }
        if self.thoughts.is_empty() {
            return;
        }
        let poses = scene.thought_poses();
        for (el, pose) in self.thoughts.iter().zip(poses.iter()) {
            dom::set_style(
                el,
                "transform",
                &format!("translate({:.1}px, {:.1}px)", pose.offset.x, pose.offset.y),
            );
            dom::set_style(el, "opacity", &format!("{:.3}", pose.opacity));
        }
    }
}
