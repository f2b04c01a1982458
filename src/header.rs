use crate::constants::{HEADER_SELECTOR, IMMERSIVE_ATTR};
use web_sys as web;

/// Reflect the page-level immersive flag onto the sticky header.
#[inline]
pub fn apply(document: &web::Document, active: bool) {
    if let Ok(Some(el)) = document.query_selector(HEADER_SELECTOR) {
        if active {
            _ = el.set_attribute(IMMERSIVE_ATTR, "true");
        } else {
            _ = el.remove_attribute(IMMERSIVE_ATTR);
        }
    }
}
