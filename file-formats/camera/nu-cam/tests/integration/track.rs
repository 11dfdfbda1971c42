//! Track reconstruction against raw frame maps

use glam::DVec3;
use nu_cam::track::{parse_frame_label, parse_frame_transform};
use nu_cam::{ConversionOptions, EulerAngles, NuCamError, TrackData, TrackReconstructor};
use pretty_assertions::assert_eq;

fn frames_from(pairs: &[(&str, &str)]) -> TrackData {
    TrackData::from_frames(pairs.iter().copied())
}

#[test]
fn sparse_labels_are_sorted_numerically() {
    let data = frames_from(&[
        ("Frame 100", "100,0,0|0,0,0|1,1,1"),
        ("Frame 9", "9,0,0|0,0,0|1,1,1"),
        ("Frame 20", "20,0,0|0,0,0|1,1,1"),
        ("Frame 0", "0,0,0|0,0,0|1,1,1"),
    ]);
    let reconstructed = TrackReconstructor::default().reconstruct(&data).unwrap();

    let xs: Vec<f64> = reconstructed.frames.iter().map(|r| r.translation.x).collect();
    assert_eq!(xs, vec![0.0, 9.0, 20.0, 100.0]);
    assert_eq!(reconstructed.frame_range, Some((0, 100)));
}

#[test]
fn whitespace_around_values_is_tolerated() {
    let record = parse_frame_transform("Frame 5", " 1.5 , -2 ,3e2| 0,0, 45 |1, 1 ,1 ").unwrap();
    assert_eq!(record.translation, DVec3::new(1.5, -2.0, 300.0));
    assert_eq!(record.rotation, EulerAngles::new(0.0, 0.0, 45.0));
}

#[test]
fn errors_name_the_frame() {
    let data = frames_from(&[
        ("Frame 1", "0,0,0|0,0,0|1,1,1"),
        ("Frame 2", "0,0,0|0,zero,0|1,1,1"),
    ]);
    let err = TrackReconstructor::default().reconstruct(&data).unwrap_err();
    assert!(err.to_string().contains("Frame 2"), "{err}");
}

#[test]
fn bad_label_rejects_whole_track() {
    let data = frames_from(&[("Frame 1", "0,0,0|0,0,0|1,1,1"), ("Shot 2", "0,0,0|0,0,0|1,1,1")]);
    let err = TrackReconstructor::default().reconstruct(&data).unwrap_err();
    assert!(matches!(err, NuCamError::Parse { ref context, .. } if context == "Shot 2"));
}

#[test]
fn duplicate_index_names_both_labels() {
    let data = frames_from(&[("Frame 1", "0,0,0|0,0,0|1,1,1"), ("Frame 01", "0,0,0|0,0,0|1,1,1")]);
    let message = TrackReconstructor::default()
        .reconstruct(&data)
        .unwrap_err()
        .to_string();
    assert!(message.contains("Frame 1"), "{message}");
    assert!(message.contains("Frame 01"), "{message}");
}

#[test]
fn zero_scale_is_rejected() {
    let data = frames_from(&[("Frame 1", "0,0,0|0,0,0|1,1,0")]);
    let err = TrackReconstructor::default().reconstruct(&data).unwrap_err();
    assert!(matches!(err, NuCamError::Validation { .. }));
}

#[test]
fn legacy_rotation_does_not_touch_baseline() {
    let json = r#"{
        "OriginalTransform": {
            "Location": {"locationX": 0, "locationY": 0, "locationZ": 0},
            "Rotation": {"roll": 10, "pitch": 20, "yaw": 30},
            "Scale": {"locationX": 1, "locationY": 1, "locationZ": 1}
        },
        "FrameData": {"Frame 1": {"FrameTransform": "0,0,0|10,20,30|1,1,1"}}
    }"#;
    let data: TrackData = serde_json::from_str(json).unwrap();
    let options = ConversionOptions {
        legacy_offset: true,
        legacy_rotation_axis_order: true,
        ..Default::default()
    };
    let reconstructed = TrackReconstructor::new(options).reconstruct(&data).unwrap();

    assert_eq!(reconstructed.baseline.rotation, EulerAngles::new(10.0, 20.0, 30.0));
    assert_eq!(
        reconstructed.frames.get(0).unwrap().rotation,
        EulerAngles::new(30.0, 10.0, 20.0)
    );
}

#[test]
fn frame_label_edge_cases() {
    assert_eq!(parse_frame_label("Frame 4294967295").unwrap(), u32::MAX);
    assert!(parse_frame_label("Frame 4294967296").is_err());
    assert!(parse_frame_label("Frame ").is_err());
}
