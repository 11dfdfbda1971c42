//! Channel permutations for rotation and translation triples

use crate::error::{NuCamError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated permutation of the three channel indices `{0, 1, 2}`
///
/// Applying the order gathers channels: `apply([a, b, c])` with order
/// `[2, 0, 1]` yields `[c, a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]", into = "[usize; 3]")]
pub struct ChannelOrder([usize; 3]);

/// Order in which the three Euler channels feed roll, pitch and yaw
pub type RotationOrder = ChannelOrder;

impl ChannelOrder {
    /// Channels are used as stored
    pub const IDENTITY: Self = Self([0, 1, 2]);

    /// Alternate rotation layout written by older exporter versions
    pub const LEGACY_ROTATION: Self = Self([2, 0, 1]);

    /// All six valid orders
    pub const ALL: [Self; 6] = [
        Self([0, 1, 2]),
        Self([0, 2, 1]),
        Self([1, 0, 2]),
        Self([1, 2, 0]),
        Self([2, 0, 1]),
        Self([2, 1, 0]),
    ];

    /// Create an order, rejecting anything that is not a permutation of `{0, 1, 2}`
    pub fn new(indices: [usize; 3]) -> Result<Self> {
        let mut seen = [false; 3];
        for &index in &indices {
            if index > 2 || seen[index] {
                return Err(NuCamError::validation(
                    "channel order",
                    format!("{indices:?} is not a permutation of [0, 1, 2]"),
                ));
            }
            seen[index] = true;
        }
        Ok(Self(indices))
    }

    /// The underlying indices
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// Gather `values` through this order
    pub fn apply<T: Copy>(&self, values: [T; 3]) -> [T; 3] {
        [values[self.0[0]], values[self.0[1]], values[self.0[2]]]
    }

    /// The order that undoes `apply`
    pub fn inverse(&self) -> Self {
        let mut inverse = [0; 3];
        for (position, &index) in self.0.iter().enumerate() {
            inverse[index] = position;
        }
        Self(inverse)
    }

    /// Whether this is the identity permutation
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[usize; 3]> for ChannelOrder {
    type Error = NuCamError;

    fn try_from(indices: [usize; 3]) -> Result<Self> {
        Self::new(indices)
    }
}

impl From<ChannelOrder> for [usize; 3] {
    fn from(order: ChannelOrder) -> Self {
        order.0
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}
