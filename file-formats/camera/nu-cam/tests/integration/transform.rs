//! Composition, decomposition and basis-change properties

use glam::DVec3;
use nu_cam::{
    AffineMatrix, BasisConverter, ChannelOrder, DecompositionError, EulerAngles, MatrixDecomposer,
    NuCamError, TransformComposer, TransformRecord,
};
use proptest::prelude::*;
use test_case::test_case;

const EPSILON: f64 = 1e-9;

fn record(translation: [f64; 3], rotation: [f64; 3], scale: [f64; 3]) -> TransformRecord {
    TransformRecord::new(
        DVec3::from_array(translation),
        EulerAngles::from_array(rotation),
        DVec3::from_array(scale),
    )
}

#[test_case([0, 1, 2] ; "identity")]
#[test_case([0, 2, 1] ; "swap last two")]
#[test_case([1, 0, 2] ; "swap first two")]
#[test_case([1, 2, 0] ; "rotate left")]
#[test_case([2, 0, 1] ; "legacy")]
#[test_case([2, 1, 0] ; "reverse")]
fn roundtrip_for_order(indices: [usize; 3]) {
    let order = ChannelOrder::new(indices).unwrap();
    let original = record([12.0, -3.5, 88.0], [-15.0, 33.0, 140.0], [1.0, 0.25, 4.0]);

    // Keep the pitch slot within ±90 for this order
    let natural = order.apply(original.rotation.to_array());
    let original = if natural[1].abs() >= 90.0 {
        record([12.0, -3.5, 88.0], [-15.0, 33.0, 40.0], [1.0, 0.25, 4.0])
    } else {
        original
    };

    let matrix = TransformComposer::new(order).compose(&original);
    let decomposed = MatrixDecomposer::new().decompose(&matrix, order).unwrap();
    assert!(
        decomposed.abs_diff_eq(&original, EPSILON),
        "{order}: {decomposed:?} != {original:?}"
    );
}

#[test]
fn up_axis_swaps_are_inverse() {
    let basis = BasisConverter::default();
    assert!(
        (basis.source_to_target() * basis.target_to_source()).abs_diff_eq(&AffineMatrix::IDENTITY, EPSILON)
    );
}

#[test]
fn converted_matrices_decompose() {
    let basis = BasisConverter::default();
    let composer = TransformComposer::default();
    let source = record([1.0, 2.0, 3.0], [10.0, 20.0, 30.0], [1.0, 1.0, 1.0]);

    let converted = basis.convert(&composer.compose(&source));
    let decomposed = MatrixDecomposer::new()
        .decompose(&converted, ChannelOrder::IDENTITY)
        .unwrap();

    // Translation only sees the X mirror of the right-hand factor
    assert!(decomposed.translation.abs_diff_eq(DVec3::new(-1.0, 2.0, 3.0), EPSILON));
    assert!(decomposed.scale.abs_diff_eq(DVec3::ONE, EPSILON));
}

#[test]
fn negative_scale_reports_reflection() {
    let mirrored = record([0.0; 3], [0.0, 10.0, 0.0], [1.0, -1.0, 1.0]);
    let matrix = TransformComposer::default().compose(&mirrored);
    let err = MatrixDecomposer::new()
        .decompose(&matrix, ChannelOrder::IDENTITY)
        .unwrap_err();
    assert!(matches!(
        err,
        NuCamError::Decomposition(DecompositionError::Reflection { .. })
    ));
}

#[test]
fn flat_export_is_row_major() {
    let matrix = TransformComposer::default().compose(&record([7.0, 8.0, 9.0], [0.0; 3], [2.0, 2.0, 2.0]));
    let flat = matrix.to_row_major_array();
    assert_eq!(flat[0], 2.0);
    assert_eq!(&flat[12..16], &[7.0, 8.0, 9.0, 1.0]);
}

proptest! {
    #[test]
    fn compose_decompose_roundtrip(
        translation in prop::array::uniform3(-1.0e4..1.0e4f64),
        roll in -179.0..179.0f64,
        pitch in -89.0..89.0f64,
        yaw in -179.0..179.0f64,
        scale in prop::array::uniform3(0.01..100.0f64),
        order_index in 0usize..6,
    ) {
        let order = ChannelOrder::ALL[order_index];
        // Scatter natural angles into the stored slots for this order
        let stored = order.inverse().apply([roll, pitch, yaw]);
        let original = record(translation, stored, scale);

        let matrix = TransformComposer::new(order).compose(&original);
        let decomposed = MatrixDecomposer::new().decompose(&matrix, order).unwrap();

        prop_assert!(decomposed.translation.abs_diff_eq(original.translation, 1e-9));
        prop_assert!(decomposed.scale.abs_diff_eq(original.scale, 1e-6));
        prop_assert!(decomposed.rotation.abs_diff_eq(&original.rotation, 1e-6));
    }
}
