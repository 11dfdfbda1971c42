//! Change-of-basis matrices between the exporter's convention and the target scene
//!
//! The exporter writes transforms in a Z-up convention; the target scene is
//! Y-up and right-handed. Two pairs of fixed matrices bridge the two:
//!
//! - `source_to_target` / `target_to_source` swap the Y and Z axes and negate
//!   one of them, so handedness is preserved and the pair is mutually inverse.
//! - `pre` / `post` sandwich a foreign matrix (`pre * M * post`). Each of them
//!   flips handedness on its own (a Y/Z swap and an X negation); together the
//!   sandwich keeps the determinant of `M`.
//!
//! # Examples
//!
//! ```rust
//! use nu_cam::basis::BasisConverter;
//! use nu_cam::matrix::AffineMatrix;
//!
//! let converter = BasisConverter::default();
//! let roundtrip = converter.source_to_target() * converter.target_to_source();
//! assert!(roundtrip.abs_diff_eq(&AffineMatrix::IDENTITY, 1e-12));
//! ```

use crate::matrix::AffineMatrix;
use serde::{Deserialize, Serialize};

const SOURCE_TO_TARGET: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

const TARGET_TO_SOURCE: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

const PRE: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

const POST: [[f64; 4]; 4] = [
    [-1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Produces the fixed basis-change matrices, multiplied by a uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisConverter {
    /// Uniform factor applied to every element of every matrix
    pub scale: f64,
}

impl BasisConverter {
    /// Create a converter whose matrices are multiplied by `scale`
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Y-up to Z-up axis swap
    pub fn source_to_target(&self) -> AffineMatrix {
        self.build(SOURCE_TO_TARGET)
    }

    /// Z-up to Y-up axis swap, the inverse of [`Self::source_to_target`]
    pub fn target_to_source(&self) -> AffineMatrix {
        self.build(TARGET_TO_SOURCE)
    }

    /// Left factor of the conversion sandwich
    pub fn pre(&self) -> AffineMatrix {
        self.build(PRE)
    }

    /// Right factor of the conversion sandwich
    pub fn post(&self) -> AffineMatrix {
        self.build(POST)
    }

    /// Convert a foreign-convention matrix: `pre * matrix * post`
    pub fn convert(&self, matrix: &AffineMatrix) -> AffineMatrix {
        self.pre() * *matrix * self.post()
    }

    fn build(&self, rows: [[f64; 4]; 4]) -> AffineMatrix {
        AffineMatrix::from_rows(rows).scaled(self.scale)
    }
}

impl Default for BasisConverter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
