//! Registered observation point.

use crate::{GeoPoint, NodeId};

/// A named camera snapped to a road-network node.
///
/// `pos` is where the camera was placed.  `node_ref` is the nearest road
/// node's identifier in the network's source data and is what gets
/// persisted; `node` is that node's index in the currently loaded network,
/// or [`NodeId::INVALID`] when the loaded network has no such node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub name:     String,
    pub pos:      GeoPoint,
    pub node:     NodeId,
    pub node_ref: i64,
}

impl Camera {
    /// Camera on a network whose source ids are its dense indices (nodes
    /// added without an explicit id).  Use [`with_node_ref`](Self::with_node_ref)
    /// otherwise.
    pub fn new(name: impl Into<String>, pos: GeoPoint, node: NodeId) -> Self {
        Self { name: name.into(), pos, node, node_ref: i64::from(node.0) }
    }

    pub fn with_node_ref(mut self, node_ref: i64) -> Self {
        self.node_ref = node_ref;
        self
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.pos.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.pos.lon
    }
}

impl std::fmt::Display for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} @ node {}", self.name, self.pos, self.node_ref)
    }
}
