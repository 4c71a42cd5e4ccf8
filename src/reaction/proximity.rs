//! Proximity scale - pull the object in and blow it up as the viewer nears
//!
//! ```text
//! d <  near        placed = near^4 / divisor   scale = near / d
//! near <= d < far  placed = d^4 / divisor      scale = 0
//! d >= far         placed = d                  scale = 0
//! ```
//! The object sits on the viewer-to-marker ray at `placed` from the viewer.

use super::policy::{Reaction, ReactionInput, TransformUpdate};
use crate::config::ProximityScaleConfig;

#[derive(Debug, Clone)]
pub struct ProximityScale {
    config: ProximityScaleConfig,
}

impl ProximityScale {
    pub fn new(config: ProximityScaleConfig) -> Self {
        Self { config }
    }

    /// Placed distance and uniform scale for viewer distance `d`
    pub fn remap(&self, d: f32) -> (f32, f32) {
        let ProximityScaleConfig { near, far, divisor } = self.config;
        if d < near {
            (near.powi(4) / divisor, near / d)
        } else if d < far {
            (d.powi(4) / divisor, 0.0)
        } else {
            (d, 0.0)
        }
    }

    pub fn react(&mut self, input: &ReactionInput) -> Reaction {
        let (placed, scale) = self.remap(input.relation.distance);
        Reaction {
            update: TransformUpdate {
                position: Some(input.viewer + input.relation.direction * placed),
                rotation: Some(input.smoothed_rotation),
                scale: Some(scale),
            },
            audio: Vec::new(),
        }
    }
}

impl Default for ProximityScale {
    fn default() -> Self {
        Self::new(ProximityScaleConfig::default())
    }
}
