//! Affine matrices in the row-vector convention used by the export and by hosts
//!
//! Points are row vectors multiplied on the left (`p' = p * M`), so the
//! translation lives in the last row and each of the first three rows holds a
//! scaled, rotated basis axis. The flat layout is the one hosts accept when a
//! world matrix is passed as sixteen numbers.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 4x4 affine matrix (row-major, translation in the last row)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    /// Matrix data in row-major order
    pub data: [f64; 16],
}

impl AffineMatrix {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // Row 0
            0.0, 1.0, 0.0, 0.0, // Row 1
            0.0, 0.0, 1.0, 0.0, // Row 2
            0.0, 0.0, 0.0, 1.0, // Row 3
        ],
    };

    /// Create identity matrix
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a matrix from four rows
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut data = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            data[r * 4..r * 4 + 4].copy_from_slice(row);
        }
        Self { data }
    }

    /// Build an affine matrix from three basis rows and a translation
    pub fn from_basis_translation(basis: [DVec3; 3], translation: DVec3) -> Self {
        Self::from_rows([
            [basis[0].x, basis[0].y, basis[0].z, 0.0],
            [basis[1].x, basis[1].y, basis[1].z, 0.0],
            [basis[2].x, basis[2].y, basis[2].z, 0.0],
            [translation.x, translation.y, translation.z, 1.0],
        ])
    }

    /// Create translation matrix
    pub fn from_translation(v: DVec3) -> Self {
        Self::from_basis_translation([DVec3::X, DVec3::Y, DVec3::Z], v)
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * 4 + col]
    }

    /// Row `index` as four values
    pub fn row(&self, index: usize) -> [f64; 4] {
        let start = index * 4;
        [
            self.data[start],
            self.data[start + 1],
            self.data[start + 2],
            self.data[start + 3],
        ]
    }

    /// Basis axis `index` (0..3) of the upper-left 3x3 block
    pub fn basis_axis(&self, index: usize) -> DVec3 {
        DVec3::new(self.get(index, 0), self.get(index, 1), self.get(index, 2))
    }

    /// Translation stored in the last row
    pub fn translation(&self) -> DVec3 {
        DVec3::new(self.get(3, 0), self.get(3, 1), self.get(3, 2))
    }

    /// Determinant of the upper-left 3x3 block
    pub fn basis_determinant(&self) -> f64 {
        let x = self.basis_axis(0);
        let y = self.basis_axis(1);
        let z = self.basis_axis(2);
        x.dot(y.cross(z))
    }

    /// Multiply every element by a uniform factor
    pub fn scaled(&self, factor: f64) -> Self {
        let mut data = self.data;
        for value in &mut data {
            *value *= factor;
        }
        Self { data }
    }

    /// Multiply two matrices (self * other); `self` is applied first to a row vector
    pub fn multiply(&self, other: &Self) -> Self {
        let mut data = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[r * 4 + c] = (0..4).map(|k| self.get(r, k) * other.get(k, c)).sum();
            }
        }
        Self { data }
    }

    /// Transform a point (row vector with w = 1)
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        let m = &self.data;
        DVec3::new(
            p.x * m[0] + p.y * m[4] + p.z * m[8] + m[12],
            p.x * m[1] + p.y * m[5] + p.z * m[9] + m[13],
            p.x * m[2] + p.y * m[6] + p.z * m[10] + m[14],
        )
    }

    /// Flat row-major copy, as passed to host world-transform setters
    pub fn to_row_major_array(&self) -> [f64; 16] {
        self.data
    }

    /// Element-wise comparison within `epsilon`
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for AffineMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
