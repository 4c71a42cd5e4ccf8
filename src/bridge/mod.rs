//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod markers;
mod registry;

pub use markers::{
    // WASM entry points
    create_marker,
    destroy_marker,
    set_viewer_position,
    marker_detected,
    marker_not_detected,
    is_marker_active,
    get_marker_transform,
    take_audio_events,
    get_skipped_ticks,
    marker_count,
    // Constants
    POSE_LEN,
};

pub use registry::MarkerRegistry;
