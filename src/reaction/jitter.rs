//! Jitter relocate - hop to random points around the marker
//!
//! One hop at a time. When the previous hop has landed, the next seen tick
//! draws a uniform horizontal offset whose range depends on the viewer's
//! distance tier and tweens toward `smoothed position + offset`. Rotation
//! snaps to the smoothed rotation every tick.

use nalgebra::Vector3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::policy::{Reaction, ReactionInput, TransformUpdate};
use super::tween::TimedTween;
use crate::config::JitterConfig;
use crate::error::TrackingError;

#[derive(Debug, Clone)]
pub struct JitterRelocate {
    config: JitterConfig,
    tween: TimedTween,
    rng: SmallRng,
    /// Set when a hop is committed, cleared once it lands and the wait
    /// elapses. No new target is drawn while set.
    has_arrived: bool,
}

impl JitterRelocate {
    pub(crate) fn new(config: JitterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            tween: TimedTween::new(config.wait_before_moving),
            config,
            rng,
            has_arrived: false,
        }
    }

    pub fn react(&mut self, input: &ReactionInput) -> Result<Reaction, TrackingError> {
        if !self.has_arrived {
            let (tier, &range) = self.config.tiers.select(input.relation.distance);
            let offset = Vector3::new(self.draw(range), self.draw(range), 0.0);
            let target = input.smoothed_position + offset;
            self.tween
                .start(input.current_position, target, self.config.movement_duration)?;
            self.has_arrived = true;
            debug!(tier, range, "jitter hop started");
        }

        let step = self.tween.advance(input.dt);
        if step.arrived {
            self.has_arrived = false;
        }

        Ok(Reaction {
            update: TransformUpdate {
                position: step.position,
                rotation: Some(input.smoothed_rotation),
                scale: None,
            },
            audio: Vec::new(),
        })
    }

    fn draw(&mut self, range: f32) -> f32 {
        if range > 0.0 {
            self.rng.gen_range(-range..=range)
        } else {
            0.0
        }
    }

    /// Abandon the hop in progress
    pub fn reset(&mut self) {
        self.tween.cancel();
        self.has_arrived = false;
    }

    pub fn has_arrived(&self) -> bool {
        self.has_arrived
    }

    /// Destination of the hop in progress
    pub fn target(&self) -> Option<Vector3<f32>> {
        self.tween.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistanceTiers;
    use crate::reaction::policy::test_support::input_at;

    fn seeded() -> JitterRelocate {
        JitterRelocate::new(JitterConfig {
            seed: Some(42),
            ..JitterConfig::default()
        })
    }

    #[test]
    fn test_first_tick_starts_hop_within_tier_range() {
        let mut jitter = seeded();
        let input = input_at(0.2, 0.1);
        jitter.react(&input).unwrap();
        assert!(jitter.has_arrived());

        let offset = jitter.target().unwrap() - input.smoothed_position;
        assert!(offset.x.abs() <= 0.05 && offset.y.abs() <= 0.05);
        assert_eq!(offset.z, 0.0);
    }

    #[test]
    fn test_target_held_while_hop_in_flight() {
        let mut jitter = seeded();
        jitter.react(&input_at(0.8, 0.1)).unwrap();
        let target = jitter.target();
        jitter.react(&input_at(0.8, 0.1)).unwrap();
        jitter.react(&input_at(0.8, 0.1)).unwrap();
        assert_eq!(jitter.target(), target);
    }

    #[test]
    fn test_halfway_position_is_midpoint() {
        let mut jitter = seeded();
        let mut input = input_at(0.5, 0.25);
        input.current_position = Vector3::new(1.0, 1.0, 0.5);
        let reaction = jitter.react(&input).unwrap();
        let target = jitter.target().unwrap();

        let midpoint = (input.current_position + target) * 0.5;
        assert!((reaction.update.position.unwrap() - midpoint).norm() < 1e-5);
    }

    #[test]
    fn test_new_target_drawn_after_arrival() {
        let mut jitter = seeded();
        jitter.react(&input_at(2.0, 0.25)).unwrap();
        let first = jitter.target().unwrap();

        let reaction = jitter.react(&input_at(2.0, 0.25)).unwrap();
        assert!(!jitter.has_arrived());
        assert!((reaction.update.position.unwrap() - first).norm() < 1e-5);

        jitter.react(&input_at(2.0, 0.25)).unwrap();
        assert!(jitter.has_arrived());
        assert_ne!(jitter.target(), Some(first));
    }

    #[test]
    fn test_wait_before_moving_defers_next_hop() {
        let mut jitter = JitterRelocate::new(JitterConfig {
            seed: Some(1),
            wait_before_moving: 0.4,
            ..JitterConfig::default()
        });
        jitter.react(&input_at(0.5, 0.5)).unwrap();
        assert!(jitter.has_arrived());
        jitter.react(&input_at(0.5, 0.2)).unwrap();
        assert!(jitter.has_arrived());
        jitter.react(&input_at(0.5, 0.25)).unwrap();
        assert!(!jitter.has_arrived());
    }

    #[test]
    fn test_rotation_updates_every_tick() {
        let mut jitter = seeded();
        for _ in 0..5 {
            let reaction = jitter.react(&input_at(0.5, 0.05)).unwrap();
            assert!(reaction.update.rotation.is_some());
        }
    }

    #[test]
    fn test_zero_range_hops_onto_marker() {
        let mut jitter = JitterRelocate::new(JitterConfig {
            tiers: DistanceTiers::new(vec![], vec![0.0]),
            seed: Some(3),
            ..JitterConfig::default()
        });
        let input = input_at(1.0, 0.1);
        jitter.react(&input).unwrap();
        assert_eq!(jitter.target(), Some(input.smoothed_position));
    }

    #[test]
    fn test_reset_cancels_hop() {
        let mut jitter = seeded();
        jitter.react(&input_at(0.5, 0.1)).unwrap();
        jitter.reset();
        assert!(!jitter.has_arrived());
        assert_eq!(jitter.target(), None);
    }
}
