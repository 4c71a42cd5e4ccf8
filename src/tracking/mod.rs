//! Tracking module - smoothing and visibility for a detected marker
//!
//! Re-exports only. All logic in submodules.

mod history;
mod pose;
mod smoother;
mod visibility;

pub use history::BoundedHistory;
pub use pose::{PoseSample, Transform};
pub use smoother::{PoseSmoother, RotationAveraging};
pub use visibility::{VisibilityGate, VisibilityState};
