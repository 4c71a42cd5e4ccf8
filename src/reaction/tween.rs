//! Timed tween - linear move polled once per tick
//!
//! Idle -> Running -> (Waiting) -> Idle. The tween keeps its own clock so
//! a move spans as many ticks as it needs without blocking any of them.

use nalgebra::Vector3;
use tracing::debug;

use crate::error::TrackingError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TweenPhase {
    Idle,
    Running {
        from: Vector3<f32>,
        to: Vector3<f32>,
        elapsed: f32,
        duration: f32,
    },
    /// Arrived, holding still before reporting it
    Waiting { remaining: f32 },
}

/// Result of advancing the tween by one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenStep {
    /// Interpolated position, present while running
    pub position: Option<Vector3<f32>>,
    /// Set on the tick the move and its post-arrival wait finish
    pub arrived: bool,
}

/// Cancellable linear interpolation between two points
#[derive(Debug, Clone)]
pub struct TimedTween {
    phase: TweenPhase,
    /// Pause after reaching the target before signalling arrival
    wait_before_moving: f32,
}

impl TimedTween {
    pub fn new(wait_before_moving: f32) -> Self {
        Self {
            phase: TweenPhase::Idle,
            wait_before_moving: wait_before_moving.max(0.0),
        }
    }

    /// Begin a move. Supersedes any move already in progress.
    pub fn start(
        &mut self,
        from: Vector3<f32>,
        to: Vector3<f32>,
        duration: f32,
    ) -> Result<(), TrackingError> {
        if !(duration > 0.0) {
            return Err(TrackingError::InvalidDuration(duration));
        }
        if !self.is_idle() {
            debug!("tween superseded");
        }
        self.phase = TweenPhase::Running {
            from,
            to,
            elapsed: 0.0,
            duration,
        };
        Ok(())
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> TweenStep {
        match self.phase {
            TweenPhase::Idle => TweenStep::default(),
            TweenPhase::Running {
                from,
                to,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / duration).clamp(0.0, 1.0);
                let position = from + (to - from) * t;

                if elapsed < duration {
                    self.phase = TweenPhase::Running {
                        from,
                        to,
                        elapsed,
                        duration,
                    };
                    return TweenStep {
                        position: Some(position),
                        arrived: false,
                    };
                }

                // Overshoot past the end already counts toward the wait
                let remaining = self.wait_before_moving - (elapsed - duration);
                let arrived = remaining <= 0.0;
                self.phase = if arrived {
                    TweenPhase::Idle
                } else {
                    TweenPhase::Waiting { remaining }
                };
                TweenStep {
                    position: Some(position),
                    arrived,
                }
            }
            TweenPhase::Waiting { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.phase = TweenPhase::Idle;
                    TweenStep {
                        position: None,
                        arrived: true,
                    }
                } else {
                    self.phase = TweenPhase::Waiting { remaining };
                    TweenStep::default()
                }
            }
        }
    }

    /// Drop the move in progress without reporting arrival
    pub fn cancel(&mut self) {
        self.phase = TweenPhase::Idle;
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TweenPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TweenPhase::Running { .. })
    }

    /// Destination of the move in progress
    pub fn target(&self) -> Option<Vector3<f32>> {
        match self.phase {
            TweenPhase::Running { to, .. } => Some(to),
            _ => None,
        }
    }
}

impl Default for TimedTween {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Vector3<f32> {
        Vector3::new(0.0, 0.0, 0.0)
    }

    fn b() -> Vector3<f32> {
        Vector3::new(2.0, -4.0, 1.0)
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let mut tween = TimedTween::default();
        assert_eq!(tween.start(a(), b(), 0.0), Err(TrackingError::InvalidDuration(0.0)));
        assert_eq!(tween.start(a(), b(), -1.0), Err(TrackingError::InvalidDuration(-1.0)));
        assert!(tween.is_idle());
    }

    #[test]
    fn test_halfway_is_midpoint() {
        let mut tween = TimedTween::default();
        tween.start(a(), b(), 0.5).unwrap();
        let step = tween.advance(0.25);
        let midpoint = (a() + b()) * 0.5;
        assert!((step.position.unwrap() - midpoint).norm() < 1e-6);
        assert!(!step.arrived);
        assert!(tween.is_running());
    }

    #[test]
    fn test_arrives_at_target_without_wait() {
        let mut tween = TimedTween::default();
        tween.start(a(), b(), 0.5).unwrap();
        tween.advance(0.25);
        let step = tween.advance(0.25);
        assert!((step.position.unwrap() - b()).norm() < 1e-6);
        assert!(step.arrived);
        assert!(tween.is_idle());
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut tween = TimedTween::default();
        tween.start(a(), b(), 0.5).unwrap();
        let step = tween.advance(2.0);
        assert!((step.position.unwrap() - b()).norm() < 1e-6);
        assert!(step.arrived);
    }

    #[test]
    fn test_wait_delays_arrival() {
        let mut tween = TimedTween::new(0.3);
        tween.start(a(), b(), 0.5).unwrap();

        let step = tween.advance(0.5);
        assert!(!step.arrived);
        assert!((step.position.unwrap() - b()).norm() < 1e-6);

        let step = tween.advance(0.2);
        assert!(!step.arrived);
        assert!(step.position.is_none());

        let step = tween.advance(0.2);
        assert!(step.arrived);
        assert!(tween.is_idle());
    }

    #[test]
    fn test_cancel_discards_move() {
        let mut tween = TimedTween::default();
        tween.start(a(), b(), 1.0).unwrap();
        tween.advance(0.1);
        tween.cancel();
        assert!(tween.is_idle());
        assert_eq!(tween.advance(0.5), TweenStep::default());
    }

    #[test]
    fn test_idle_tween_produces_nothing() {
        let mut tween = TimedTween::default();
        assert_eq!(tween.advance(0.1), TweenStep::default());
        assert_eq!(tween.target(), None);
    }
}
