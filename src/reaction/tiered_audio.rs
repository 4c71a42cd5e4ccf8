//! Tiered audio - loop a channel chosen by viewer distance
//!
//! Only starts loops. Unless `stop_on_tier_change` is set, the channel of
//! a previous tier keeps looping after the viewer moves to another tier.

use tracing::debug;

use super::audio::AudioRequest;
use super::policy::{Reaction, ReactionInput};
use crate::config::TieredAudioConfig;

#[derive(Debug, Clone)]
pub struct TieredAudio {
    config: TieredAudioConfig,
    /// Channel most recently told to loop
    looping: Option<u32>,
    /// Last started channel, kept across `reset` so it can still be stopped
    sounding: Option<u32>,
}

impl TieredAudio {
    pub(crate) fn new(config: TieredAudioConfig) -> Self {
        Self {
            config,
            looping: None,
            sounding: None,
        }
    }

    pub fn react(&mut self, input: &ReactionInput) -> Reaction {
        let (tier, &channel) = self.config.tiers.select(input.relation.distance);
        let mut audio = Vec::new();

        if self.looping != Some(channel) {
            debug!(tier, channel, "audio tier");
            if self.config.stop_on_tier_change {
                if let Some(previous) = self.sounding.filter(|&p| p != channel) {
                    audio.push(AudioRequest::StopLoop { channel: previous });
                }
            }
            audio.push(AudioRequest::StartLoop { channel });
            self.looping = Some(channel);
            self.sounding = Some(channel);
        }

        Reaction {
            update: Default::default(),
            audio,
        }
    }

    /// Forget which channel is looping; the next seen tick restarts one.
    /// The host keeps playing the old loop, so it is still stopped on the
    /// next tier change.
    pub fn reset(&mut self) {
        self.looping = None;
    }

    pub fn looping(&self) -> Option<u32> {
        self.looping
    }
}

impl Default for TieredAudio {
    fn default() -> Self {
        Self::new(TieredAudioConfig::default())
    }
}
