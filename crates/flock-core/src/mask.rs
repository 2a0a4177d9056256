//! Obstacle layer bitmask.

use std::fmt;

/// A 32-layer bitmask selecting which obstacle layers a query may hit.
///
/// Bit `n` set means layer `n` is included.  An obstacle on layer `l` is hit
/// by a query with mask `m` iff `m.contains_layer(l)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing only `layer`.  Layers at or above 32 yield `NONE`.
    #[inline]
    pub fn from_layer(layer: u8) -> Self {
        LayerMask(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    #[inline]
    pub fn contains_layer(self, layer: u8) -> bool {
        self.intersects(LayerMask::from_layer(layer))
    }

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;
    #[inline]
    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
