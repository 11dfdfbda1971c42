//! Every combination of the two legacy compatibility switches

use glam::DVec3;
use nu_cam::{
    AnimationApplier, BasisConverter, ConversionOptions, EulerAngles, ExportDocument,
    TrackReconstructor, TransformComposer, TransformRecord,
};
use test_case::test_case;

const EXPORT: &str = r#"{
    "Animation": {
        "Track 0": {
            "OriginalTransform": {
                "Location": {"locationX": 1, "locationY": 0, "locationZ": 0},
                "Rotation": {"roll": 0, "pitch": 0, "yaw": 0},
                "Scale": {"locationX": 1, "locationY": 1, "locationZ": 1}
            },
            "FrameData": {
                "Frame 1": {"FrameTransform": "5,6,7|10,20,30|1,1,1"}
            }
        }
    }
}"#;

#[test_case(false, false ; "current export")]
#[test_case(true, false ; "legacy offset only")]
#[test_case(false, true ; "legacy rotation only")]
#[test_case(true, true ; "both legacy switches")]
fn flag_combination(legacy_offset: bool, legacy_rotation_axis_order: bool) {
    let document = ExportDocument::from_json(EXPORT).unwrap();
    let options = ConversionOptions {
        legacy_offset,
        legacy_rotation_axis_order,
        ..Default::default()
    };
    let track = TrackReconstructor::new(options)
        .reconstruct(document.track("Track 0").unwrap())
        .unwrap();

    let expected_baseline = if legacy_offset {
        TransformRecord::new(DVec3::X, EulerAngles::ZERO, DVec3::ONE)
    } else {
        TransformRecord::IDENTITY
    };
    assert_eq!(track.baseline, expected_baseline);

    let expected_rotation = if legacy_rotation_axis_order {
        EulerAngles::new(30.0, 10.0, 20.0)
    } else {
        EulerAngles::new(10.0, 20.0, 30.0)
    };
    let frame = *track.frames.get(0).unwrap();
    assert_eq!(frame.rotation, expected_rotation);
    assert_eq!(frame.translation, DVec3::new(5.0, 6.0, 7.0));

    // Baseline enters as the third factor of the chain
    let basis = BasisConverter::default();
    let composer = TransformComposer::default();
    let expected = basis.pre() * composer.compose(&frame) * composer.compose(&expected_baseline) * basis.post();
    let matrices = AnimationApplier::default().world_matrices(&track.frames, &track.baseline);
    assert_eq!(matrices.len(), 1);
    assert!(matrices[0].abs_diff_eq(&expected, 1e-12));

    // The offset shifts translation along the export's X axis
    let shift = if legacy_offset { 1.0 } else { 0.0 };
    assert!((matrices[0].translation().x - -(5.0 + shift)).abs() < 1e-12);
}
