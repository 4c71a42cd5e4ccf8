//! Error taxonomy shared by the tracking core and the wasm bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while smoothing, relating or reacting to a marker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// Averaging was requested before any sample was pushed
    #[error("history buffer is empty")]
    EmptyBuffer,

    /// Viewer sits exactly on the marker, so there is no direction
    #[error("viewer coincides with the marker position")]
    DegenerateDistance,

    /// Tween duration must be strictly positive
    #[error("tween duration must be positive, got {0}")]
    InvalidDuration(f32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no marker registered with id {0}")]
    UnknownMarker(u32),
}

impl From<TrackingError> for JsValue {
    fn from(err: TrackingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
