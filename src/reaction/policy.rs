//! Reaction policy - one behaviour per tracked object, picked by config
//!
//! Every behaviour consumes the same per-tick input and returns a partial
//! transform plus any audio requests. The dispatcher owns the merging.

use nalgebra::{Quaternion, Vector3};

use super::audio::AudioRequest;
use super::geometry::ViewerRelation;
use super::jitter::JitterRelocate;
use super::oscillator::Oscillator;
use super::proximity::ProximityScale;
use super::tiered_audio::TieredAudio;
use crate::config::PolicyConfig;
use crate::error::TrackingError;
use crate::tracking::Transform;

/// Everything a behaviour sees on a seen tick
#[derive(Debug, Clone, Copy)]
pub struct ReactionInput {
    pub smoothed_position: Vector3<f32>,
    pub smoothed_rotation: Quaternion<f32>,
    pub viewer: Vector3<f32>,
    pub relation: ViewerRelation,
    /// Where the object currently is (smoothed position before the first move)
    pub current_position: Vector3<f32>,
    /// Seconds since the previous tick
    pub dt: f32,
}

/// Fields of the object's transform a behaviour wants changed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformUpdate {
    pub position: Option<Vector3<f32>>,
    pub rotation: Option<Quaternion<f32>>,
    pub scale: Option<f32>,
}

impl TransformUpdate {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Overlay onto `base`; `None` when nothing changes
    pub fn apply_to(&self, base: Transform) -> Option<Transform> {
        if self.is_empty() {
            return None;
        }
        Some(Transform {
            position: self.position.unwrap_or(base.position),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.unwrap_or(base.scale),
        })
    }
}

/// Output of one behaviour evaluation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    pub update: TransformUpdate,
    pub audio: Vec<AudioRequest>,
}

/// The configured behaviour of a tracked object
#[derive(Debug, Clone)]
pub enum ReactionPolicy {
    ProximityScale(ProximityScale),
    Oscillating(Oscillator),
    JitterRelocate(JitterRelocate),
    TieredAudio(TieredAudio),
}

impl ReactionPolicy {
    pub fn from_config(config: &PolicyConfig) -> Result<Self, TrackingError> {
        config.validate()?;
        Ok(match config {
            PolicyConfig::ProximityScale(c) => ReactionPolicy::ProximityScale(ProximityScale::new(c.clone())),
            PolicyConfig::Oscillating(c) => ReactionPolicy::Oscillating(Oscillator::new(c.clone())),
            PolicyConfig::JitterRelocate(c) => ReactionPolicy::JitterRelocate(JitterRelocate::new(c.clone())),
            PolicyConfig::TieredAudio(c) => ReactionPolicy::TieredAudio(TieredAudio::new(c.clone())),
        })
    }

    /// Evaluate the behaviour for one seen tick
    pub fn react(&mut self, input: &ReactionInput) -> Result<Reaction, TrackingError> {
        match self {
            ReactionPolicy::ProximityScale(p) => Ok(p.react(input)),
            ReactionPolicy::Oscillating(p) => Ok(p.react(input)),
            ReactionPolicy::JitterRelocate(p) => p.react(input),
            ReactionPolicy::TieredAudio(p) => Ok(p.react(input)),
        }
    }

    /// Called when the object is hidden
    pub fn reset(&mut self) {
        match self {
            ReactionPolicy::ProximityScale(_) | ReactionPolicy::Oscillating(_) => {}
            ReactionPolicy::JitterRelocate(p) => p.reset(),
            ReactionPolicy::TieredAudio(p) => p.reset(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReactionPolicy::ProximityScale(_) => "proximity_scale",
            ReactionPolicy::Oscillating(_) => "oscillating",
            ReactionPolicy::JitterRelocate(_) => "jitter_relocate",
            ReactionPolicy::TieredAudio(_) => "tiered_audio",
        }
    }
}
