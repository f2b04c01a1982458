/// Page wiring for the web frontend: element ids, selectors and attributes.
///
/// Animation tuning lives in `flow_core::constants`; this file only names the
/// DOM hooks the page template provides.
pub const PITCH_FLOW_SECTION_ID: &str = "pitch-flow";
pub const ENTRAINMENT_SECTION_ID: &str = "entrainment";

// Inside each section
pub const CANVAS_SELECTOR: &str = "canvas";
pub const BEAT_SELECTOR: &str = "[data-beat]";
pub const THOUGHT_SELECTOR: &str = "[data-thought]";

// Header immersive flag
pub const HEADER_SELECTOR: &str = "header";
pub const IMMERSIVE_ATTR: &str = "data-immersive";

// Waitlist form
pub const WAITLIST_FORM_ID: &str = "waitlist-form";
pub const WAITLIST_EMAIL_ID: &str = "waitlist-email";
pub const WAITLIST_MESSAGE_ID: &str = "waitlist-message";
pub const WAITLIST_ENDPOINT: &str = "/api/waitlist";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Backing store never exceeds this many device pixels per CSS pixel
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Fixed seeds keep the first paint stable between reloads
pub const PITCH_FLOW_SEED: u64 = 0x5eed_f10e;
pub const ENTRAINMENT_SEED: u64 = 0x5eed_e772;
