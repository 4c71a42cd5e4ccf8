//! Pose and transform data shared between tracking and reactions

use nalgebra::{Quaternion, Vector3};

/// One raw detection of the marker, as reported by the detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    pub position: Vector3<f32>,
    /// Expected to be unit length on input
    pub rotation: Quaternion<f32>,
}

impl PoseSample {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Build from a flat `[px, py, pz, qx, qy, qz, qw]` slice
    pub fn from_slice(data: &[f32]) -> Option<Self> {
        if data.len() != 7 {
            return None;
        }
        Some(Self {
            position: Vector3::new(data[0], data[1], data[2]),
            rotation: Quaternion::new(data[6], data[3], data[4], data[5]),
        })
    }
}

/// Placement of the reactive object handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Not necessarily unit length (see `RotationAveraging::ComponentWise`)
    pub rotation: Quaternion<f32>,
    /// Uniform scale
    pub scale: f32,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Quaternion::identity(),
            scale: 1.0,
        }
    }

    /// Flat `[px, py, pz, qx, qy, qz, qw, scale]` for the JS side
    pub fn to_flat(&self) -> Vec<f32> {
        vec![
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.i,
            self.rotation.j,
            self.rotation.k,
            self.rotation.w,
            self.scale,
        ]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
