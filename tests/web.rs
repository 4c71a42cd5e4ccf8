//! Test suite for WASM bindings
//! Run with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]

use marker_react::bridge::*;
use marker_react::version;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn pose_at(z: f32) -> [f32; POSE_LEN] {
    [0.0, 0.0, z, 0.0, 0.0, 0.0, 1.0]
}

#[wasm_bindgen_test]
fn test_version() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn test_default_marker_lifecycle() {
    let id = create_marker(JsValue::UNDEFINED).unwrap();
    assert!(!is_marker_active(id));

    set_viewer_position(0.0, 0.0, 0.0);
    marker_detected(id, &pose_at(1.0), 0.016).unwrap();
    assert!(is_marker_active(id));

    let transform = get_marker_transform(id).unwrap();
    assert_eq!(transform.len(), 8);
    assert!((transform[7] - 1.6).abs() < 1e-5);

    for _ in 0..3 {
        marker_not_detected(id, 0.016).unwrap();
    }
    assert!(!is_marker_active(id));

    assert!(destroy_marker(id));
    assert!(get_marker_transform(id).is_none());
}

#[wasm_bindgen_test]
fn test_wrong_pose_length_is_ignored() {
    let id = create_marker(JsValue::NULL).unwrap();
    marker_detected(id, &[0.0; 3], 0.016).unwrap();
    assert!(!is_marker_active(id));
    destroy_marker(id);
}

#[wasm_bindgen_test]
fn test_unknown_marker_errors() {
    assert!(marker_not_detected(u32::MAX, 0.016).is_err());
    assert!(take_audio_events(u32::MAX).is_err());
}

#[wasm_bindgen_test]
fn test_tiered_audio_events_drain() {
    let config = js_sys::JSON::parse(r#"{ "policy": { "kind": "tiered_audio" } }"#).unwrap();
    let id = create_marker(config).unwrap();
    set_viewer_position(0.0, 0.0, 0.0);
    marker_detected(id, &pose_at(0.1), 0.016).unwrap();

    let events = js_sys::Array::from(&take_audio_events(id).unwrap());
    assert_eq!(events.length(), 1);
    let drained = js_sys::Array::from(&take_audio_events(id).unwrap());
    assert_eq!(drained.length(), 0);
    destroy_marker(id);
}
