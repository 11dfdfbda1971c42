//! Document to scene, the way a host binding drives the crate

use glam::DVec3;
use nu_cam::{
    AffineMatrix, Channel, ExportDocument, ImportSettings, Importer, NuCamError, RecordingScene,
    SceneGraph, TrackReconstructor, TransformComposer,
};
use pretty_assertions::assert_eq;

const EPSILON: f64 = 1e-9;

const TWO_FRAMES: &str = r#"{
    "Animation": {
        "Track 0": {
            "FrameData": {
                "Frame 2": {"FrameTransform": "10,0,0|0,90,0|1,1,1"},
                "Frame 1": {"FrameTransform": "0,0,0|0,0,0|1,1,1"}
            }
        }
    }
}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn two_frames_reconstruct_and_compose() {
    init_logging();
    let document = ExportDocument::from_json(TWO_FRAMES).unwrap();
    let track = TrackReconstructor::default()
        .reconstruct(document.track("Track 0").unwrap())
        .unwrap();
    assert_eq!(track.frames.len(), 2);

    let composer = TransformComposer::default();
    let first = composer.compose(track.frames.get(0).unwrap());
    assert!(first.abs_diff_eq(&AffineMatrix::IDENTITY, EPSILON));

    // Quarter turn about Y driven by the second channel
    let second = composer.compose(track.frames.get(1).unwrap());
    let expected = AffineMatrix::from_rows([
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0, 1.0],
    ]);
    assert!(second.abs_diff_eq(&expected, EPSILON), "{second:?}");
}

#[test]
fn import_keys_every_frame_on_anim() {
    init_logging();
    let document = ExportDocument::from_json(TWO_FRAMES).unwrap();
    let settings = ImportSettings {
        start_time: 0.0,
        step: 1.0,
        group_name: "shot_010".to_string(),
        ..Default::default()
    };
    let mut scene = RecordingScene::new();
    let report = Importer::new(&document, settings).run(&mut scene).unwrap();

    assert_eq!(scene.node(report.rig.group).unwrap().name, "shot_010");
    assert_eq!((report.start_time, report.end_time), (0.0, 2.0));
    assert!(report.reference.is_none());
    assert!(scene.keyframes(report.rig.world).is_empty());

    let keys = scene.keyframes(report.rig.anim);
    assert_eq!(keys.iter().map(|k| k.time).collect::<Vec<_>>(), vec![0.0, 1.0]);

    // The keyed world matrix recomposes to what was set on the node
    let last = &keys[1];
    assert_eq!(last.value(Channel::TranslateX), Some(-10.0));
    let order = scene.rotation_order(&report.rig.anim).unwrap();
    let recomposed = TransformComposer::new(order).compose(&last.transform);
    assert!(recomposed.abs_diff_eq(&scene.node(report.rig.anim).unwrap().world, EPSILON));
    assert!(last.transform.scale.abs_diff_eq(DVec3::ONE, EPSILON));
}

#[test]
fn failed_import_leaves_scene_untouched() {
    let document = ExportDocument::from_json(
        r#"{"Animation": {"Track 0": {"FrameData": {
            "Frame 1": {"FrameTransform": "0,0,0|0,0,0|1,1,1"},
            "Frame 2": {"FrameTransform": "0,0,0|0,0,0|0,1,1"}
        }}}}"#,
    )
    .unwrap();
    let mut scene = RecordingScene::new();
    let err = Importer::new(&document, ImportSettings::default())
        .run(&mut scene)
        .unwrap_err();
    assert!(matches!(err, NuCamError::Validation { .. }));
    assert!(scene.nodes().is_empty());
}
