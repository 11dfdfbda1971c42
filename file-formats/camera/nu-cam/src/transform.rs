//! Translation / rotation / scale records exchanged between pipeline stages

use crate::error::{NuCamError, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Three Euler angles in degrees, in the channel order they were stored
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl EulerAngles {
    /// No rotation
    pub const ZERO: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub const fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Componentwise comparison within `epsilon` degrees
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

/// A single rigid transform sample: translation, Euler rotation (degrees) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub translation: DVec3,
    pub rotation: EulerAngles,
    pub scale: DVec3,
}

impl TransformRecord {
    /// Zero translation, zero rotation, unit scale
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: EulerAngles::ZERO,
        scale: DVec3::ONE,
    };

    pub const fn new(translation: DVec3, rotation: EulerAngles, scale: DVec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Build a record from nine flat values (translation, rotation, scale)
    ///
    /// Rejects any other length. Scale is not validated here; see [`Self::validate`].
    pub fn from_channels(values: &[f64]) -> Result<Self> {
        let [tx, ty, tz, a, b, c, sx, sy, sz] = values else {
            return Err(NuCamError::parse(
                "transform channels",
                format!("expected 9 values, got {}", values.len()),
            ));
        };
        Ok(Self::new(
            DVec3::new(*tx, *ty, *tz),
            EulerAngles::new(*a, *b, *c),
            DVec3::new(*sx, *sy, *sz),
        ))
    }

    /// Reject zero or non-finite scale components, which would compose a singular matrix
    pub fn validate(&self, context: &str) -> Result<()> {
        for (axis, value) in ["x", "y", "z"].iter().zip(self.scale.to_array()) {
            if value == 0.0 || !value.is_finite() {
                return Err(NuCamError::validation(
                    context,
                    format!("scale {axis} is {value}; scale components must be non-zero"),
                ));
            }
        }
        Ok(())
    }

    /// Componentwise comparison within `epsilon`
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.translation.abs_diff_eq(other.translation, epsilon)
            && self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.scale.abs_diff_eq(other.scale, epsilon)
    }
}

impl Default for TransformRecord {
    fn default() -> Self {
        Self::IDENTITY
    }
}
