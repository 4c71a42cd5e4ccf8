//! Marker-to-viewer geometry

use nalgebra::Vector3;

use crate::error::TrackingError;

/// Where the marker sits relative to the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerRelation {
    /// Euclidean length of `marker - viewer`
    pub distance: f32,
    /// Unit vector from the viewer toward the marker
    pub direction: Vector3<f32>,
}

impl ViewerRelation {
    /// Fails with `DegenerateDistance` when the two points coincide
    pub fn between(marker: Vector3<f32>, viewer: Vector3<f32>) -> Result<Self, TrackingError> {
        let offset = marker - viewer;
        let distance = offset.norm();

        // Also catches NaN coordinates
        if !(distance > 0.0) {
            return Err(TrackingError::DegenerateDistance);
        }

        Ok(Self {
            distance,
            direction: offset / distance,
        })
    }
}
