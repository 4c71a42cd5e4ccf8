//! Audio requests emitted for the host's audio sink

use serde::{Deserialize, Serialize};

/// One discrete instruction for the host audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioRequest {
    /// Fire-and-forget playback of `clip` on `channel`
    PlayOneShot { channel: u32, clip: u32 },
    /// Start looping whatever `channel` holds
    StartLoop { channel: u32 },
    StopLoop { channel: u32 },
}

impl AudioRequest {
    pub fn channel(&self) -> u32 {
        match *self {
            AudioRequest::PlayOneShot { channel, .. }
            | AudioRequest::StartLoop { channel }
            | AudioRequest::StopLoop { channel } => channel,
        }
    }
}
