pub mod clock;
pub mod constants;
pub mod easing;
pub mod entrainment;
pub mod immersive;
pub mod lifecycle;
pub mod narrative;
pub mod particles;
pub mod ripples;
pub mod scene;
pub mod scroll;
pub mod smoothing;
pub mod surface;
pub mod thoughts;
pub mod waitlist;

pub use clock::*;
pub use easing::*;
pub use entrainment::EntrainmentField;
pub use immersive::{ImmersiveMode, SectionId};
pub use lifecycle::{LoopGate, PageHide};
pub use narrative::{Beat, BeatTrack};
pub use particles::*;
pub use ripples::*;
pub use scene::*;
pub use scroll::*;
pub use smoothing::*;
pub use surface::*;
pub use thoughts::{ThoughtLayout, ThoughtPose};
