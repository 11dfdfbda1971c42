//! Affine matrix composition from exporter transforms
//!
//! The exporter names its rotation channels roll, pitch and yaw (rotation
//! about X, Y and Z). The resulting basis rows follow the exporter's own
//! rotation-matrix formula, sign conventions included:
//!
//! ```text
//! row 0 = ( CP*CY,              CP*SY,              SP     ) * sx
//! row 1 = ( SR*SP*CY - CR*SY,   SR*SP*SY + CR*CY,   -SR*CP ) * sy
//! row 2 = ( -(CR*SP*CY + SR*SY), CY*SR - CR*SP*SY,  CR*CP  ) * sz
//! row 3 = ( tx,                 ty,                 tz     )
//! ```

use crate::matrix::AffineMatrix;
use crate::order::RotationOrder;
use crate::transform::TransformRecord;
use glam::DVec3;

/// Builds affine matrices from [`TransformRecord`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformComposer {
    order: RotationOrder,
}

impl TransformComposer {
    /// Create a composer that gathers `[roll, pitch, yaw]` from the record's angles through `order`
    pub fn new(order: RotationOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> RotationOrder {
        self.order
    }

    /// Compose the record into a single affine matrix
    pub fn compose(&self, record: &TransformRecord) -> AffineMatrix {
        let [roll, pitch, yaw] = self.order.apply(record.rotation.to_array());

        let (sp, cp) = pitch.to_radians().sin_cos();
        let (sy, cy) = yaw.to_radians().sin_cos();
        let (sr, cr) = roll.to_radians().sin_cos();

        let x_axis = DVec3::new(cp * cy, cp * sy, sp);
        let y_axis = DVec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp);
        let z_axis = DVec3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp);

        AffineMatrix::from_basis_translation(
            [
                x_axis * record.scale.x,
                y_axis * record.scale.y,
                z_axis * record.scale.z,
            ],
            record.translation,
        )
    }
}

/// Compose `record` with the identity rotation order
pub fn compose(record: &TransformRecord) -> AffineMatrix {
    TransformComposer::default().compose(record)
}
