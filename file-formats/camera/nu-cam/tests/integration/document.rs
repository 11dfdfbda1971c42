//! Export document loading

use nu_cam::{ExportDocument, NuCamError};
use std::io::Write;

const EXPORT: &str = r#"{
    "Animation": {
        "Track 0": {"FrameData": {"Frame 1": {"FrameTransform": "0,0,0|0,0,0|1,1,1"}}},
        "Track 1": {"FrameData": {}}
    },
    "Actor 1": {
        "Type": "Camera",
        "Transform": {
            "Location": {"locationX": "0", "locationY": "0", "locationZ": "0"},
            "Rotation": {"roll": "0", "pitch": "0", "yaw": "0"},
            "Scale": {"locationX": "1", "locationY": "1", "locationZ": "1"}
        }
    },
    "Actor 5": {
        "Type": "Camera",
        "Transform": {
            "Location": {"locationX": 1, "locationY": 2, "locationZ": 3},
            "Rotation": {"roll": 0, "pitch": 0, "yaw": 0},
            "Scale": {"locationX": 1, "locationY": 1, "locationZ": 1}
        }
    },
    "Actor 10": {
        "Type": "AtomView",
        "Transform": {
            "Location": {"locationX": 0, "locationY": 0, "locationZ": 0},
            "Rotation": {"roll": 0, "pitch": 0, "yaw": 0},
            "Scale": {"locationX": 1, "locationY": 1, "locationZ": 1}
        }
    },
    "Actor 3": {"Type": "PointLight"}
}"#;

#[test]
fn load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();

    let document = ExportDocument::from_path(file.path()).unwrap();
    assert_eq!(document.tracks.len(), 2);
    assert_eq!(document.reference_actors.keys().collect::<Vec<_>>(), vec!["Actor010"]);
}

#[test]
fn last_camera_wins() {
    let document: ExportDocument = EXPORT.parse().unwrap();
    let camera = document.camera.unwrap();
    assert_eq!(camera.key, "Actor 5");
    assert_eq!(camera.transform.translation.z, 3.0);
}

#[test]
fn missing_file_is_io_error() {
    let err = ExportDocument::from_path("/nonexistent/export.json").unwrap_err();
    assert!(matches!(err, NuCamError::Io(_)));
}

#[test]
fn zero_scale_actor_is_rejected_on_selection() {
    let json = r#"{"Actor 2": {"Type": "AtomView", "Transform": {
        "Location": {"locationX": 0, "locationY": 0, "locationZ": 0},
        "Rotation": {"roll": 0, "pitch": 0, "yaw": 0},
        "Scale": {"locationX": 1, "locationY": 0, "locationZ": 1}}}}"#;
    let document = ExportDocument::from_json(json).unwrap();
    let err = document.reference_actor("Actor002").unwrap_err();
    assert!(matches!(
        err,
        NuCamError::InvalidActor { ref actor, ref reason }
            if actor == "Actor 2" && reason.contains("Validation error in Actor 2")
    ));
}
