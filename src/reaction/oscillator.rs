//! Oscillator - orbit the marker and click faster as the viewer closes in

use nalgebra::Vector3;
use tracing::debug;

use super::audio::AudioRequest;
use super::policy::{Reaction, ReactionInput, TransformUpdate};
use crate::config::OscillatingConfig;

#[derive(Debug, Clone)]
pub struct Oscillator {
    config: OscillatingConfig,
    /// Accumulated orbit angle (radians)
    phase: f32,
    /// Seconds since the last retrigger
    timer: f32,
    last_tier: Option<usize>,
}

impl Oscillator {
    pub(crate) fn new(config: OscillatingConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            timer: 0.0,
            last_tier: None,
        }
    }

    pub fn react(&mut self, input: &ReactionInput) -> Reaction {
        let (index, tier) = self.config.tiers.select(input.relation.distance);
        let tier = *tier;
        if self.last_tier != Some(index) {
            debug!(tier = index, rate = tier.angular_rate, "oscillation tier");
            self.last_tier = Some(index);
        }

        // Phase and timer carry across tier changes
        self.phase += tier.angular_rate * input.dt;
        let orbit = Vector3::new(self.phase.cos(), self.phase.sin(), 0.0) * self.config.radius;

        let mut audio = Vec::new();
        self.timer += input.dt;
        if self.timer > tier.retrigger_interval {
            audio.push(AudioRequest::PlayOneShot {
                channel: tier.channel,
                clip: self.config.clip,
            });
            self.timer = 0.0;
        }

        Reaction {
            update: TransformUpdate {
                position: Some(input.smoothed_position + orbit),
                rotation: Some(input.smoothed_rotation),
                scale: None,
            },
            audio,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(OscillatingConfig::default())
    }
}
