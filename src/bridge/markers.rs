//! Marker objects and JS bridge
//!
//! JavaScript owns the detector and the frame loop. Each frame it reports
//! the viewer position, then every marker's detection (or miss), then
//! reads back transforms, activation and audio requests.

use std::cell::RefCell;

use nalgebra::Vector3;
use wasm_bindgen::prelude::*;

use super::registry::MarkerRegistry;
use crate::config::TrackerConfig;
use crate::tracking::PoseSample;

/// Floats per detection: px, py, pz, qx, qy, qz, qw
pub const POSE_LEN: usize = 7;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static REGISTRY: RefCell<MarkerRegistry> = RefCell::new(MarkerRegistry::new());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Create a tracked marker object from a (partial) config object.
///
/// `undefined`/`null` gives the default proximity-scale object.
#[wasm_bindgen]
pub fn create_marker(config: JsValue) -> Result<u32, JsValue> {
    let config: TrackerConfig = if config.is_undefined() || config.is_null() {
        TrackerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let id = REGISTRY.with(|cell| cell.borrow_mut().create(&config))?;
    web_sys::console::log_1(
        &format!(
            "🎯 Marker {} created ({}, {} frame smoothing)",
            id,
            config.policy.name(),
            config.smoothed_frames
        )
        .into(),
    );
    Ok(id)
}

/// Tear down a marker object. Returns false if it did not exist.
#[wasm_bindgen]
pub fn destroy_marker(id: u32) -> bool {
    let removed = REGISTRY.with(|cell| cell.borrow_mut().destroy(id));
    if removed {
        web_sys::console::log_1(&format!("🗑️ Marker {} destroyed", id).into());
    }
    removed
}

/// Update the viewer (camera eye) position for this frame
#[wasm_bindgen]
pub fn set_viewer_position(x: f32, y: f32, z: f32) {
    REGISTRY.with(|cell| cell.borrow_mut().set_viewer(Vector3::new(x, y, z)));
}

/// Marker `id` was detected this frame.
///
/// `pose` is a Float32Array of 7 values: position xyz, rotation xyzw.
#[wasm_bindgen]
pub fn marker_detected(id: u32, pose: &[f32], dt: f32) -> Result<(), JsValue> {
    let Some(sample) = PoseSample::from_slice(pose) else {
        web_sys::console::warn_1(
            &format!(
                "Invalid pose length for marker {}: {} (expected {})",
                id,
                pose.len(),
                POSE_LEN
            )
            .into(),
        );
        return Ok(());
    };

    REGISTRY.with(|cell| cell.borrow_mut().seen(id, sample, checked_dt(id, dt)))?;
    Ok(())
}

/// Marker `id` was not detected this frame
#[wasm_bindgen]
pub fn marker_not_detected(id: u32, dt: f32) -> Result<(), JsValue> {
    REGISTRY.with(|cell| cell.borrow_mut().not_seen(id, checked_dt(id, dt)))?;
    Ok(())
}

/// Should marker `id` be rendered
#[wasm_bindgen]
pub fn is_marker_active(id: u32) -> bool {
    REGISTRY.with(|cell| cell.borrow().is_active(id).unwrap_or(false))
}

/// Latest transform as `[px, py, pz, qx, qy, qz, qw, scale]`
#[wasm_bindgen]
pub fn get_marker_transform(id: u32) -> Option<Vec<f32>> {
    REGISTRY.with(|cell| {
        cell.borrow()
            .transform(id)
            .ok()
            .flatten()
            .map(|t| t.to_flat())
    })
}

/// Drain queued audio requests as an array of `{ kind, channel, clip? }`
#[wasm_bindgen]
pub fn take_audio_events(id: u32) -> Result<JsValue, JsValue> {
    let events = REGISTRY.with(|cell| cell.borrow_mut().take_audio(id))?;
    Ok(serde_wasm_bindgen::to_value(&events)?)
}

/// Seen ticks skipped because the viewer sat on the marker
#[wasm_bindgen]
pub fn get_skipped_ticks(id: u32) -> u32 {
    REGISTRY.with(|cell| cell.borrow().skipped_ticks(id).unwrap_or(0))
}

/// Number of live marker objects
#[wasm_bindgen]
pub fn marker_count() -> usize {
    REGISTRY.with(|cell| cell.borrow().len())
}

/// Warn about an unusable frame step; the dispatcher treats it as zero
fn checked_dt(id: u32, dt: f32) -> f32 {
    if !(dt.is_finite() && dt >= 0.0) {
        web_sys::console::warn_1(
            &format!("Invalid dt for marker {}: {} (treated as 0)", id, dt).into(),
        );
        return 0.0;
    }
    dt
}
