//! Loading camera configuration from JSON.

use std::io::Write;

use sprite3d::*;

#[test]
fn test_load_options_file() {
    let path = std::env::temp_dir().join(format!("sprite3d-options-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "name": "overhead",
                "viewport_width": 640,
                "viewport_height": 480,
                "fov_degrees": 60.0,
                "depth_range": {{ "near": 1.0, "far": 100.0 }}
            }}"#
        )
        .unwrap();
    }

    let options = CameraOptions::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let camera = PerspectiveCamera::perspective(&options);
    assert_eq!(camera.name(), "overhead");
    assert_eq!(camera.viewport(), UVec2::new(640, 480));
    assert!((camera.fov() - 60.0).abs() < 1e-4);
    assert_eq!(camera.depth_range(), DepthRange::new(1.0, 100.0));
}

#[test]
fn test_invalid_options_rejected() {
    let err = CameraOptions::from_json_str(r#"{ "pixel_scale": -1.0 }"#).unwrap_err();
    assert!(matches!(err, Sprite3dError::InvalidPixelScale(_)));

    let err = CameraOptions::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Sprite3dError::JsonError(_)));
}

#[test]
fn test_options_serialize() {
    let json = CameraOptions::orthographic().with_zoom(3.0).to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["zoom"], 3.0);
    assert_eq!(value["window_origin"], "BottomLeft");
}
