//! Marker React - tracked-marker reactive objects
//!
//! Smooths per-frame fiducial marker poses, decides visibility with
//! hysteresis, and drives one distance-reactive behaviour per object
//! (proximity scaling, orbiting with audio clicks, random hops, tiered
//! audio loops).
//!
//! Entry point for the WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod bridge;
pub mod config;
pub mod error;
pub mod reaction;
pub mod tracking;

use wasm_bindgen::prelude::*;

pub use config::{PolicyConfig, TrackerConfig};
pub use error::TrackingError;
pub use reaction::{AudioRequest, DetectorEvent, FrameOutput, ReactionDispatcher, ReactionSink, ViewerLocator};
pub use tracking::{PoseSample, Transform};

// Re-export wasm_bindgen functions for JS access
pub use bridge::{create_marker, destroy_marker, marker_detected, marker_not_detected};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Announce the module; safe to call more than once
#[wasm_bindgen]
pub fn init() {
    console_log!(
        "✅ marker-react {} ready ({} markers)",
        env!("CARGO_PKG_VERSION"),
        bridge::marker_count()
    );
}

/// Crate version, for the host's diagnostics
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
