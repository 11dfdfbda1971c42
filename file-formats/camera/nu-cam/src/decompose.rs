//! Decomposition of world matrices back into translation, Euler rotation and scale
//!
//! The inverse of [`crate::compose::TransformComposer`]: scale comes from the
//! lengths of the basis rows, the normalized rows form the rotation, and the
//! rotation is read back as roll/pitch/yaw before being scattered into the
//! caller's channel order. Matrices containing a reflection are rejected
//! instead of being turned into a silently mirrored rotation.

use crate::error::{DecompositionError, Result};
use crate::matrix::AffineMatrix;
use crate::order::RotationOrder;
use crate::transform::{EulerAngles, TransformRecord};
use glam::DVec3;

/// Basis rows shorter than this are treated as collapsed
const MIN_AXIS_LENGTH: f64 = 1e-12;

/// Below this `cos(pitch)` roll and yaw share one degree of freedom
const GIMBAL_EPSILON: f64 = 1e-9;

/// Splits affine matrices into [`TransformRecord`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixDecomposer;

impl MatrixDecomposer {
    pub fn new() -> Self {
        Self
    }

    /// Decompose `matrix`, reporting the angles in `order`
    ///
    /// `decompose(compose(r, order), order)` reproduces `r` whenever its
    /// angles are principal values (pitch within ±90°, the others within ±180°).
    pub fn decompose(&self, matrix: &AffineMatrix, order: RotationOrder) -> Result<TransformRecord> {
        let translation = matrix.translation();

        let mut rows = [DVec3::ZERO; 3];
        let mut scale = [0.0; 3];
        for (axis, (row, length)) in rows.iter_mut().zip(scale.iter_mut()).enumerate() {
            let basis = matrix.basis_axis(axis);
            *length = basis.length();
            if *length < MIN_AXIS_LENGTH {
                return Err(DecompositionError::Singular { axis }.into());
            }
            *row = basis / *length;
        }

        let determinant = matrix.basis_determinant();
        if determinant < 0.0 {
            log::debug!("Refusing to decompose matrix with determinant {determinant}");
            return Err(DecompositionError::Reflection { determinant }.into());
        }

        let natural = natural_angles(&rows);
        let stored = order.inverse().apply(natural.map(f64::to_degrees));

        Ok(TransformRecord::new(
            translation,
            EulerAngles::from_array(stored),
            DVec3::from_array(scale),
        ))
    }
}

/// Read `[roll, pitch, yaw]` in radians from orthonormal basis rows
fn natural_angles(rows: &[DVec3; 3]) -> [f64; 3] {
    let sin_pitch = rows[0].z.clamp(-1.0, 1.0);
    let pitch = sin_pitch.asin();

    if pitch.cos() < GIMBAL_EPSILON {
        // Yaw is folded into roll
        let sign = sin_pitch.signum();
        let roll = (rows[1].x * sign).atan2(rows[1].y);
        return [roll, pitch, 0.0];
    }

    let yaw = rows[0].y.atan2(rows[0].x);
    let roll = (-rows[1].z).atan2(rows[2].z);
    [roll, pitch, yaw]
}

/// Decompose `matrix` with the given order
pub fn decompose(matrix: &AffineMatrix, order: RotationOrder) -> Result<TransformRecord> {
    MatrixDecomposer::new().decompose(matrix, order)
}
