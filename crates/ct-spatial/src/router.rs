//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `ct-registry` calls routing via the [`Router`] trait, so applications can
//! swap in A* or a contraction hierarchy without touching the tracker.  The
//! default [`DijkstraRouter`] is enough for city-sized networks.
//!
//! # Cost units
//!
//! Edge weight is `edge_length_m`, so a route's cost is its physical length
//! in metres.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ct_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the nodes to visit in order, both
/// endpoints included, and the total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    /// Sum of traversed edge lengths, metres.
    pub total_length_m: f64,
}

impl Route {
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn total_length_km(&self) -> f64 {
        self.total_length_m / 1_000.0
    }

    /// Coordinates of the route's nodes, for drawing a polyline.
    pub fn coords(&self, network: &RoadNetwork) -> Vec<GeoPoint> {
        network.path_coords(&self.nodes)
    }

    /// Mean of the route's node coordinates; a map centre for the route.
    pub fn centroid(&self, network: &RoadNetwork) -> Option<GeoPoint> {
        GeoPoint::centroid(&self.coords(network))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve queries
/// from several threads against a shared [`RoadNetwork`].
pub trait Router: Send + Sync {
    /// Compute a minimum-length route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route.  Implementations must be
    /// deterministic: the same inputs always give the same node sequence.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidNode`] if either node is not in `network`.
    /// - [`SpatialError::NoRoute`] if `to` is unreachable from `from`.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Binary-heap Dijkstra over the CSR road graph.
///
/// Ties between equal-cost frontier entries pop in ascending `NodeId`, and a
/// node's predecessor is only replaced by a strictly shorter path, so among
/// equal-length shortest paths the result is always the same one.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry ordered by `(cost, node)`.  `f64` has no total order, so the
/// comparison goes through `total_cmp`.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(SpatialError::InvalidNode(node));
        }
    }
    if from == to {
        return Ok(Route { nodes: vec![from], total_length_m: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known length (m) to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; INVALID for unreached nodes and `from`.
    let mut prev = vec![NodeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap.
    let mut heap: BinaryHeap<Reverse<Frontier>> = BinaryHeap::new();
    heap.push(Reverse(Frontier { cost: 0.0, node: from }));

    while let Some(Reverse(Frontier { cost, node })) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (neighbor, length_m) in network.neighbors(node) {
            let new_cost = cost + length_m;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse(Frontier { cost: new_cost, node: neighbor }));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId, total_length_m: f64) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        debug_assert_ne!(cur, NodeId::INVALID, "broken predecessor chain");
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, total_length_m }
}
