//! Visibility gate - hysteresis on the detector's seen/not-seen signal
//!
//! A single detection makes the object visible. Hiding requires a run of
//! consecutive misses, so a marker flickering out for a frame or two
//! does not blink the object.

use tracing::debug;

/// Whether the tracked object should currently be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

/// Hysteresis state machine for one tracked object
#[derive(Debug, Clone)]
pub struct VisibilityGate {
    state: VisibilityState,
    /// Consecutive not-seen ticks since the last detection
    missed_frames: u32,
    /// Misses needed before hiding; 0 behaves like 1
    missed_frames_until_disabled: u32,
    /// When false, misses never hide the object
    disable_when_not_seen: bool,
}

impl VisibilityGate {
    pub fn new(missed_frames_until_disabled: u32, disable_when_not_seen: bool) -> Self {
        Self {
            state: VisibilityState::Hidden,
            missed_frames: 0,
            missed_frames_until_disabled,
            disable_when_not_seen,
        }
    }

    /// Marker detected this tick. Always reactivates.
    pub fn on_seen(&mut self) -> VisibilityState {
        self.missed_frames = 0;
        if self.state != VisibilityState::Visible {
            debug!("marker visible");
        }
        self.state = VisibilityState::Visible;
        self.state
    }

    /// Marker missing this tick
    pub fn on_not_seen(&mut self) -> VisibilityState {
        if !self.disable_when_not_seen {
            return self.state;
        }

        self.missed_frames = self.missed_frames.saturating_add(1);
        if self.missed_frames >= self.missed_frames_until_disabled
            && self.state == VisibilityState::Visible
        {
            debug!(missed = self.missed_frames, "marker lost, hiding");
            self.state = VisibilityState::Hidden;
        }
        self.state
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Activation signal for the renderer
    pub fn is_active(&self) -> bool {
        self.state == VisibilityState::Visible
    }

    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(3, true)
    }
}
