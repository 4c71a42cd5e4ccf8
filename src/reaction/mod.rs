//! Reaction module - distance-driven behaviours for a tracked object
//!
//! Re-exports only. All logic in submodules.

mod audio;
mod dispatcher;
mod geometry;
mod jitter;
mod oscillator;
mod policy;
mod proximity;
mod sink;
mod tiered_audio;
mod tween;

pub use audio::AudioRequest;
pub use dispatcher::ReactionDispatcher;
pub use geometry::ViewerRelation;
pub use jitter::JitterRelocate;
pub use oscillator::Oscillator;
pub use policy::{Reaction, ReactionInput, ReactionPolicy, TransformUpdate};
pub use proximity::ProximityScale;
pub use sink::{DetectorEvent, FrameOutput, ReactionSink, ViewerLocator};
pub use tiered_audio::TieredAudio;
pub use tween::{TimedTween, TweenStep};
