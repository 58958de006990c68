//! Road-network node identifier.
//!
//! A `NodeId` is the position of a node in one loaded road network's
//! arrays.  It is only meaningful for that network: the identifier a node
//! carries in its source data (an OSM id, a CSV `id` column) is kept
//! separately and is what gets persisted.

use std::fmt;

/// Dense index of a node within a loaded road network.  Ascending order is
/// the canonical enumeration order used for tie-breaks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Marks a camera whose stored node is not part of the loaded network.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            f.write_str("NodeId(invalid)")
        }
    }
}
