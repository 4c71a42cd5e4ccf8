//! Reaction dispatcher - per-tick driver for one tracked marker object
//!
//! Owns the smoother, the visibility gate and the configured behaviour.
//! Per tick:
//! - not seen: visibility gate only
//! - seen: gate, smoother, viewer relation, behaviour, then output

use tracing::trace;

use super::geometry::ViewerRelation;
use super::policy::{ReactionInput, ReactionPolicy};
use super::sink::{DetectorEvent, ReactionSink, ViewerLocator};
use crate::config::TrackerConfig;
use crate::error::TrackingError;
use crate::tracking::{PoseSmoother, Transform, VisibilityGate, VisibilityState};

#[derive(Debug)]
pub struct ReactionDispatcher {
    smoother: PoseSmoother,
    gate: VisibilityGate,
    policy: ReactionPolicy,
    /// Last transform handed to the sink
    transform: Option<Transform>,
    /// Seen ticks whose reaction was skipped (viewer on the marker)
    skipped_ticks: u32,
}

impl ReactionDispatcher {
    pub fn new(config: &TrackerConfig) -> Result<Self, TrackingError> {
        config.validate()?;
        Ok(Self {
            smoother: PoseSmoother::new(config.smoothed_frames, config.rotation_averaging)?,
            gate: VisibilityGate::new(
                config.missed_frames_until_disabled,
                config.disable_when_not_seen,
            ),
            policy: ReactionPolicy::from_config(&config.policy)?,
            transform: None,
            skipped_ticks: 0,
        })
    }

    /// Run one tick
    pub fn tick<V, S>(
        &mut self,
        event: &DetectorEvent,
        viewer: &V,
        dt: f32,
        sink: &mut S,
    ) -> Result<(), TrackingError>
    where
        V: ViewerLocator + ?Sized,
        S: ReactionSink + ?Sized,
    {
        // A NaN step would poison every accumulator for good
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            trace!(dt, "non-positive or non-finite step treated as zero");
            0.0
        };

        let sample = match event {
            DetectorEvent::NotSeen => {
                let was_active = self.gate.is_active();
                self.gate.on_not_seen();
                if was_active && !self.gate.is_active() {
                    self.policy.reset();
                }
                sink.set_active(self.gate.is_active());
                return Ok(());
            }
            DetectorEvent::Seen(sample) => sample,
        };

        self.gate.on_seen();
        sink.set_active(true);

        self.smoother.on_seen(sample);
        let smoothed_position = self.smoother.smoothed_position()?;
        let smoothed_rotation = self.smoother.smoothed_rotation()?;
        let viewer = viewer.viewer_position();

        let relation = match ViewerRelation::between(smoothed_position, viewer) {
            Ok(relation) => relation,
            Err(TrackingError::DegenerateDistance) => {
                self.skipped_ticks = self.skipped_ticks.saturating_add(1);
                trace!(skipped = self.skipped_ticks, "viewer on marker, tick skipped");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let input = ReactionInput {
            smoothed_position,
            smoothed_rotation,
            viewer,
            relation,
            current_position: self
                .transform
                .map_or(smoothed_position, |t| t.position),
            dt,
        };
        let reaction = self.policy.react(&input)?;

        if let Some(transform) = reaction
            .update
            .apply_to(self.transform.unwrap_or_default())
        {
            self.transform = Some(transform);
            sink.apply_transform(&transform);
        }
        for request in reaction.audio {
            sink.audio(request);
        }
        Ok(())
    }

    pub fn visibility(&self) -> VisibilityState {
        self.gate.state()
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    pub fn skipped_ticks(&self) -> u32 {
        self.skipped_ticks
    }

    pub fn policy(&self) -> &ReactionPolicy {
        &self.policy
    }

    pub fn smoother(&self) -> &PoseSmoother {
        &self.smoother
    }
}
