//! Pose smoother - moving average over the last few detections
//!
//! Position is the arithmetic mean of the buffered samples. Rotation is
//! the component-wise mean of the quaternion components, which is NOT a
//! proper rotation average: the result is generally not unit length and is
//! biased when the samples are far apart. It is kept as the default because
//! downstream content is tuned against it; `RotationAveraging::Normalized`
//! is the better-behaved alternative.

use nalgebra::{Quaternion, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use super::history::BoundedHistory;
use super::pose::PoseSample;
use crate::error::TrackingError;

/// How buffered rotations are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationAveraging {
    /// Plain mean of (x, y, z, w); not renormalised
    #[default]
    ComponentWise,
    /// Hemisphere-aligned mean, renormalised to unit length
    Normalized,
}

/// Moving-average filter for marker position and rotation
#[derive(Debug, Clone)]
pub struct PoseSmoother {
    positions: BoundedHistory<Vector3<f32>>,
    rotations: BoundedHistory<Vector4<f32>>,
    averaging: RotationAveraging,
}

impl PoseSmoother {
    /// `window` is the number of detections averaged; fixed for the
    /// smoother's lifetime.
    pub fn new(window: usize, averaging: RotationAveraging) -> Result<Self, TrackingError> {
        Ok(Self {
            positions: BoundedHistory::new(window)?,
            rotations: BoundedHistory::new(window)?,
            averaging,
        })
    }

    /// Record a fresh detection
    pub fn on_seen(&mut self, sample: &PoseSample) {
        self.positions.push(sample.position);
        self.rotations.push(sample.rotation.coords);
    }

    /// Mean of the buffered positions
    pub fn smoothed_position(&self) -> Result<Vector3<f32>, TrackingError> {
        self.positions
            .average(|a, b| a + b, |sum, n| sum / n as f32)
    }

    /// Mean of the buffered rotations according to the configured mode
    pub fn smoothed_rotation(&self) -> Result<Quaternion<f32>, TrackingError> {
        match self.averaging {
            RotationAveraging::ComponentWise => {
                let mean = self
                    .rotations
                    .average(|a, b| a + b, |sum, n| sum / n as f32)?;
                Ok(Quaternion::from(mean))
            }
            RotationAveraging::Normalized => self.normalized_rotation(),
        }
    }

    fn normalized_rotation(&self) -> Result<Quaternion<f32>, TrackingError> {
        let reference = *self.rotations.newest().ok_or(TrackingError::EmptyBuffer)?;

        // q and -q are the same rotation; flip samples onto the reference hemisphere
        let sum = self.rotations.iter().fold(Vector4::zeros(), |acc, q| {
            if q.dot(&reference) < 0.0 {
                acc - q
            } else {
                acc + q
            }
        });

        let norm = sum.norm();
        if norm > f32::EPSILON {
            Ok(Quaternion::from(sum / norm))
        } else {
            Ok(Quaternion::from(reference))
        }
    }

    /// Number of detections currently contributing to the average
    pub fn sample_count(&self) -> usize {
        self.positions.len()
    }

    pub fn window(&self) -> usize {
        self.positions.capacity()
    }


    /// Forget every buffered detection
    pub fn reset(&mut self) {
        self.positions.clear();
        self.rotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_1_SQRT_2;

    fn sample(x: f32, y: f32, z: f32, rotation: Quaternion<f32>) -> PoseSample {
        PoseSample::new(Vector3::new(x, y, z), rotation)
    }

    #[test]
    fn test_accessors_fail_before_first_sample() {
        let smoother = PoseSmoother::new(4, RotationAveraging::ComponentWise).unwrap();
        assert_eq!(smoother.smoothed_position(), Err(TrackingError::EmptyBuffer));
        assert_eq!(smoother.smoothed_rotation(), Err(TrackingError::EmptyBuffer));
    }

    #[test]
    fn test_position_mean_below_capacity() {
        let mut smoother = PoseSmoother::new(4, RotationAveraging::ComponentWise).unwrap();
        smoother.on_seen(&sample(0.0, 0.0, 0.0, Quaternion::identity()));
        smoother.on_seen(&sample(2.0, 4.0, 6.0, Quaternion::identity()));
        smoother.on_seen(&sample(4.0, 2.0, 0.0, Quaternion::identity()));
        let p = smoother.smoothed_position().unwrap();
        assert!((p - Vector3::new(2.0, 2.0, 2.0)).norm() < 1e-6);
    }

    #[test]
    fn test_position_mean_uses_only_window() {
        let mut smoother = PoseSmoother::new(2, RotationAveraging::ComponentWise).unwrap();
        smoother.on_seen(&sample(100.0, 0.0, 0.0, Quaternion::identity()));
        smoother.on_seen(&sample(1.0, 0.0, 0.0, Quaternion::identity()));
        smoother.on_seen(&sample(3.0, 0.0, 0.0, Quaternion::identity()));
        let p = smoother.smoothed_position().unwrap();
        assert!((p.x - 2.0).abs() < 1e-6);
        assert_eq!(smoother.sample_count(), 2);
    }

    #[test]
    fn test_component_wise_rotation_is_not_renormalised() {
        let mut smoother = PoseSmoother::new(4, RotationAveraging::ComponentWise).unwrap();
        // identity and 90 degrees about Y
        let quarter_turn = Quaternion::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2, 0.0);
        smoother.on_seen(&sample(0.0, 0.0, 0.0, Quaternion::identity()));
        smoother.on_seen(&sample(0.0, 0.0, 0.0, quarter_turn));

        let q = smoother.smoothed_rotation().unwrap();
        assert!((q.w - (1.0 + FRAC_1_SQRT_2) / 2.0).abs() < 1e-6);
        assert!((q.j - FRAC_1_SQRT_2 / 2.0).abs() < 1e-6);
        assert!(q.i.abs() < 1e-6 && q.k.abs() < 1e-6);
        assert!(q.norm() < 1.0);
    }

    #[test]
    fn test_normalized_rotation_is_unit_and_hemisphere_aligned() {
        let mut smoother = PoseSmoother::new(4, RotationAveraging::Normalized).unwrap();
        let q = Quaternion::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2, 0.0);
        smoother.on_seen(&sample(0.0, 0.0, 0.0, q));
        // Same rotation, opposite sign
        smoother.on_seen(&sample(0.0, 0.0, 0.0, -q));

        let avg = smoother.smoothed_rotation().unwrap();
        assert!((avg.norm() - 1.0).abs() < 1e-5);
        assert!((avg.coords.dot(&(-q).coords).abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset_empties_both_buffers() {
        let mut smoother = PoseSmoother::new(3, RotationAveraging::ComponentWise).unwrap();
        smoother.on_seen(&sample(1.0, 1.0, 1.0, Quaternion::identity()));
        smoother.reset();
        assert_eq!(smoother.sample_count(), 0);
        assert_eq!(smoother.window(), 3);
        assert!(smoother.smoothed_rotation().is_err());
    }
}
