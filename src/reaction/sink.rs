//! Host-facing collaborators: where the viewer is and where output goes

use nalgebra::Vector3;

use super::audio::AudioRequest;
use crate::tracking::{PoseSample, Transform};

/// What the detector reported for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorEvent {
    Seen(PoseSample),
    NotSeen,
}

/// Source of the viewer (camera eye) position
pub trait ViewerLocator {
    fn viewer_position(&self) -> Vector3<f32>;
}

/// A fixed viewer
impl ViewerLocator for Vector3<f32> {
    fn viewer_position(&self) -> Vector3<f32> {
        *self
    }
}

/// Receives the tracked object's output each tick
pub trait ReactionSink {
    /// Whether the object should be rendered / collide
    fn set_active(&mut self, active: bool);
    fn apply_transform(&mut self, transform: &Transform);
    fn audio(&mut self, request: AudioRequest);
}

/// Sink that records everything, for hosts that poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub active: bool,
    /// Latest transform applied
    pub transform: Option<Transform>,
    /// Audio requests not yet taken by the host
    pub audio: Vec<AudioRequest>,
}

impl FrameOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over queued audio requests
    pub fn take_audio(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.audio)
    }
}

impl ReactionSink for FrameOutput {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.transform = Some(*transform);
    }

    fn audio(&mut self, request: AudioRequest) {
        self.audio.push(request);
    }
}
