//! Marker registry - every live tracked object plus the shared viewer
//!
//! Plain Rust so it can be driven natively; the wasm entry points in
//! `markers.rs` wrap a thread-local instance.

use std::collections::BTreeMap;

use nalgebra::Vector3;

use crate::config::TrackerConfig;
use crate::error::TrackingError;
use crate::reaction::{AudioRequest, DetectorEvent, FrameOutput, ReactionDispatcher};
use crate::tracking::{PoseSample, Transform};

/// One tracked object and what it last produced
struct MarkerSlot {
    dispatcher: ReactionDispatcher,
    output: FrameOutput,
}

/// All tracked objects of the page
pub struct MarkerRegistry {
    markers: BTreeMap<u32, MarkerSlot>,
    next_id: u32,
    /// Camera eye position, updated by the host each frame
    viewer: Vector3<f32>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
            next_id: 1,
            viewer: Vector3::zeros(),
        }
    }

    /// Build a tracked object; returns its id
    pub fn create(&mut self, config: &TrackerConfig) -> Result<u32, TrackingError> {
        let dispatcher = ReactionDispatcher::new(config)?;
        // After wrap-around, skip ids that are still live
        let mut id = self.next_id;
        while self.markers.contains_key(&id) {
            id = following_id(id);
        }
        self.next_id = following_id(id);
        self.markers.insert(
            id,
            MarkerSlot {
                dispatcher,
                output: FrameOutput::new(),
            },
        );
        Ok(id)
    }

    /// Drop a tracked object. Any hop in flight dies with it.
    pub fn destroy(&mut self, id: u32) -> bool {
        self.markers.remove(&id).is_some()
    }

    pub fn set_viewer(&mut self, position: Vector3<f32>) {
        self.viewer = position;
    }

    /// Feed this tick's detector result for marker `id`
    pub fn tick(&mut self, id: u32, event: &DetectorEvent, dt: f32) -> Result<(), TrackingError> {
        let viewer = self.viewer;
        let slot = self
            .markers
            .get_mut(&id)
            .ok_or(TrackingError::UnknownMarker(id))?;
        slot.dispatcher.tick(event, &viewer, dt, &mut slot.output)
    }

    pub fn seen(&mut self, id: u32, sample: PoseSample, dt: f32) -> Result<(), TrackingError> {
        self.tick(id, &DetectorEvent::Seen(sample), dt)
    }

    pub fn not_seen(&mut self, id: u32, dt: f32) -> Result<(), TrackingError> {
        self.tick(id, &DetectorEvent::NotSeen, dt)
    }

    pub fn is_active(&self, id: u32) -> Result<bool, TrackingError> {
        self.slot(id).map(|s| s.output.active)
    }

    pub fn transform(&self, id: u32) -> Result<Option<Transform>, TrackingError> {
        self.slot(id).map(|s| s.output.transform)
    }

    /// Drain the audio requests queued since the last call
    pub fn take_audio(&mut self, id: u32) -> Result<Vec<AudioRequest>, TrackingError> {
        self.markers
            .get_mut(&id)
            .map(|s| s.output.take_audio())
            .ok_or(TrackingError::UnknownMarker(id))
    }

    pub fn skipped_ticks(&self, id: u32) -> Result<u32, TrackingError> {
        self.slot(id).map(|s| s.dispatcher.skipped_ticks())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn slot(&self, id: u32) -> Result<&MarkerSlot, TrackingError> {
        self.markers.get(&id).ok_or(TrackingError::UnknownMarker(id))
    }
}

/// Ids start at 1 and wrap past `u32::MAX` back to 1
fn following_id(id: u32) -> u32 {
    id.wrapping_add(1).max(1)
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
