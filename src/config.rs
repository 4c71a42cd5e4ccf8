//! Per-marker configuration
//!
//! Every struct deserialises from a partial host object: missing fields
//! take the defaults below, which reproduce the shipped behaviours.

use serde::{Deserialize, Serialize};

use crate::error::TrackingError;
use crate::tracking::RotationAveraging;

/// Detections averaged by the smoother
pub const DEFAULT_SMOOTHED_FRAMES: usize = 4;

/// Consecutive misses before the object hides
pub const DEFAULT_MISSED_FRAMES_UNTIL_DISABLED: u32 = 3;

/// Complete configuration of one tracked marker object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub smoothed_frames: usize,
    pub missed_frames_until_disabled: u32,
    pub disable_when_not_seen: bool,
    pub rotation_averaging: RotationAveraging,
    pub policy: PolicyConfig,
}

impl TrackerConfig {
    /// Default tracking with the given reaction policy
    pub fn with_policy(policy: PolicyConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Reject configurations the tracker cannot run with
    pub fn validate(&self) -> Result<(), TrackingError> {
        if self.smoothed_frames == 0 {
            return Err(TrackingError::InvalidConfig(
                "smoothed_frames must be at least 1".into(),
            ));
        }
        self.policy.validate()
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothed_frames: DEFAULT_SMOOTHED_FRAMES,
            missed_frames_until_disabled: DEFAULT_MISSED_FRAMES_UNTIL_DISABLED,
            disable_when_not_seen: true,
            rotation_averaging: RotationAveraging::ComponentWise,
            policy: PolicyConfig::default(),
        }
    }
}

/// Which reaction drives the object, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    ProximityScale(ProximityScaleConfig),
    Oscillating(OscillatingConfig),
    JitterRelocate(JitterConfig),
    TieredAudio(TieredAudioConfig),
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), TrackingError> {
        match self {
            PolicyConfig::ProximityScale(c) => c.validate(),
            PolicyConfig::Oscillating(c) => c.validate(),
            PolicyConfig::JitterRelocate(c) => c.validate(),
            PolicyConfig::TieredAudio(c) => c.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolicyConfig::ProximityScale(_) => "proximity_scale",
            PolicyConfig::Oscillating(_) => "oscillating",
            PolicyConfig::JitterRelocate(_) => "jitter_relocate",
            PolicyConfig::TieredAudio(_) => "tiered_audio",
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig::ProximityScale(ProximityScaleConfig::default())
    }
}

// ============================================================================
// DISTANCE TIERS
// ============================================================================

/// Piecewise-constant lookup on viewer distance.
///
/// Level `i` applies while `d < breakpoints[i]`; the last level applies to
/// everything beyond the final breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTiers<T> {
    pub breakpoints: Vec<f32>,
    pub levels: Vec<T>,
}

impl<T> DistanceTiers<T> {
    pub fn new(breakpoints: Vec<f32>, levels: Vec<T>) -> Self {
        Self { breakpoints, levels }
    }

    /// Tier index and level for distance `d`.
    ///
    /// Only called on tiers that passed `validate`, so `levels` is never empty.
    pub(crate) fn select(&self, d: f32) -> (usize, &T) {
        let index = self
            .breakpoints
            .iter()
            .position(|&b| d < b)
            .unwrap_or(self.breakpoints.len())
            .min(self.levels.len().saturating_sub(1));
        (index, &self.levels[index])
    }

    pub fn validate(&self, what: &str) -> Result<(), TrackingError> {
        if self.levels.len() != self.breakpoints.len() + 1 {
            return Err(TrackingError::InvalidConfig(format!(
                "{what}: expected {} levels for {} breakpoints, got {}",
                self.breakpoints.len() + 1,
                self.breakpoints.len(),
                self.levels.len()
            )));
        }
        if self.breakpoints.iter().any(|b| !b.is_finite()) {
            return Err(TrackingError::InvalidConfig(format!(
                "{what}: breakpoints must be finite"
            )));
        }
        if self.breakpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TrackingError::InvalidConfig(format!(
                "{what}: breakpoints must be strictly ascending"
            )));
        }
        Ok(())
    }
}

fn require_non_negative(what: &str, value: f32) -> Result<(), TrackingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TrackingError::InvalidConfig(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}

// ============================================================================
// POLICY PARAMETERS
// ============================================================================

/// Pull the object toward the viewer and scale it up when close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityScaleConfig {
    /// Inside this distance the object is scaled by `near / d`
    pub near: f32,
    /// Beyond this distance the object sits at the marker
    pub far: f32,
    /// Placed distance in the middle band is `d^4 / divisor`
    pub divisor: f32,
}

impl ProximityScaleConfig {
    fn validate(&self) -> Result<(), TrackingError> {
        if !(self.near > 0.0 && self.near.is_finite()) {
            return Err(TrackingError::InvalidConfig("near must be positive".into()));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(TrackingError::InvalidConfig("far must exceed near".into()));
        }
        if !(self.divisor > 0.0 && self.divisor.is_finite()) {
            return Err(TrackingError::InvalidConfig("divisor must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ProximityScaleConfig {
    fn default() -> Self {
        Self {
            near: 1.6,
            far: 2.714,
            divisor: 20.0,
        }
    }
}

/// Orbit speed and click rate for one distance tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationTier {
    /// Phase advance in rad/s
    pub angular_rate: f32,
    /// Seconds between one-shot retriggers
    pub retrigger_interval: f32,
    /// Audio channel the one-shot plays on
    pub channel: u32,
}

/// Orbit around the marker, faster and louder the closer the viewer is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatingConfig {
    pub tiers: DistanceTiers<OscillationTier>,
    /// Orbit radius in the marker's XY plane
    pub radius: f32,
    /// Clip played on every retrigger
    pub clip: u32,
}

impl OscillatingConfig {
    fn validate(&self) -> Result<(), TrackingError> {
        self.tiers.validate("oscillating tiers")?;
        require_non_negative("radius", self.radius)?;
        for tier in &self.tiers.levels {
            if !tier.angular_rate.is_finite() {
                return Err(TrackingError::InvalidConfig("angular_rate must be finite".into()));
            }
            require_non_negative("retrigger_interval", tier.retrigger_interval)?;
        }
        Ok(())
    }
}

impl Default for OscillatingConfig {
    fn default() -> Self {
        let tier = |angular_rate, retrigger_interval, channel| OscillationTier {
            angular_rate,
            retrigger_interval,
            channel,
        };
        Self {
            tiers: DistanceTiers::new(
                vec![0.5, 1.0, 1.5],
                vec![
                    tier(10.0, 0.2, 0),
                    tier(6.0, 0.3, 1),
                    tier(3.0, 0.6, 2),
                    tier(1.0, 1.5, 3),
                ],
            ),
            radius: 0.15,
            clip: 0,
        }
    }
}

/// Hop to random nearby points, wider the farther the viewer is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    /// Half-width of the uniform horizontal offset per tier
    pub tiers: DistanceTiers<f32>,
    /// Seconds each hop takes
    pub movement_duration: f32,
    /// Pause after arriving before the next hop
    pub wait_before_moving: f32,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl JitterConfig {
    fn validate(&self) -> Result<(), TrackingError> {
        self.tiers.validate("jitter tiers")?;
        for range in &self.tiers.levels {
            require_non_negative("jitter range", *range)?;
        }
        if !(self.movement_duration > 0.0 && self.movement_duration.is_finite()) {
            return Err(TrackingError::InvalidDuration(self.movement_duration));
        }
        require_non_negative("wait_before_moving", self.wait_before_moving)
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            tiers: DistanceTiers::new(vec![0.3, 0.6, 1.0], vec![0.05, 0.2, 0.4, 0.6]),
            movement_duration: 0.5,
            wait_before_moving: 0.0,
            seed: None,
        }
    }
}

/// Loop a different audio channel depending on viewer distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieredAudioConfig {
    /// Channel looped per tier
    pub tiers: DistanceTiers<u32>,
    /// Stop the previous loop when the tier changes
    pub stop_on_tier_change: bool,
}

impl TieredAudioConfig {
    fn validate(&self) -> Result<(), TrackingError> {
        self.tiers.validate("audio tiers")
    }
}

impl Default for TieredAudioConfig {
    fn default() -> Self {
        Self {
            tiers: DistanceTiers::new(vec![0.3, 0.6, 1.0], vec![3, 2, 1, 0]),
            stop_on_tier_change: false,
        }
    }
}
