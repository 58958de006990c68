//! Road network representation, builder, and nearest-node resolution.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the index range:
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! `edge_to` and `edge_length_m` are sorted by source node
//! (stable, so insertion order survives within a node).  Iteration over a
//! node's neighbours is therefore a contiguous memory scan, which is what
//! Dijkstra's inner loop wants.
//!
//! # Source ids
//!
//! Every node also carries the identifier it has in the data the network
//! was loaded from (`external_ids`, with a reverse map).  `NodeId`s depend on
//! load order; source ids do not, so anything persisted refers to nodes by
//! source id and is mapped back with [`RoadNetwork::node_by_external_id`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over unit-sphere `[x, y, z]` vectors maps a
//! coordinate to its nearest `NodeId`.  Straight-line (chord) distance in 3-D
//! grows monotonically with great-circle distance, so the tree's nearest
//! neighbour is also the haversine nearest neighbour; the few candidates
//! within float noise of the best are re-ranked by haversine and then by
//! `NodeId` so ties always go to the node added first.

use std::collections::HashMap;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ct_core::{GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

/// Two haversine distances closer than this (km) are treated as a tie.
const TIE_EPS_KM: f64 = 1e-9;

/// Candidates whose chord distance is within this of the best chord are
/// re-ranked by haversine.  ~6 mm on the Earth's surface.
const CHORD_SLACK: f64 = 1e-9;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a unit-sphere point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length between two unit vectors.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Immutable once built, and `Send + Sync`: a single instance can be shared
/// read-only by every query thread.  Do not construct directly; use
/// [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at edge indices
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  This is the routing weight.
    pub edge_length_m: Vec<f64>,

    // ── Source ids ────────────────────────────────────────────────────────
    /// Source-data id of each node.  Indexed by `NodeId`.
    pub external_ids: Vec<i64>,

    /// Reverse of `external_ids`.
    by_external: HashMap<i64, NodeId>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Every resolution request against it fails with
    /// [`SpatialError::GraphEmpty`].
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// `true` if `node` exists in this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// Position of `node`, or `None` if it is not in the network.
    #[inline]
    pub fn node_pos(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// Source-data id of `node`, or `None` if it is not in the network.
    #[inline]
    pub fn external_id(&self, node: NodeId) -> Option<i64> {
        self.external_ids.get(node.index()).copied()
    }

    /// The node whose source-data id is `external`.
    #[inline]
    pub fn node_by_external_id(&self, external: i64) -> Option<NodeId> {
        self.by_external.get(&external).copied()
    }

    /// All nodes with their positions, in canonical (ascending `NodeId`) order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (NodeId(i as u32), pos))
    }

    /// Positions of the given nodes in order, skipping any not in the network.
    pub fn path_coords(&self, nodes: &[NodeId]) -> Vec<GeoPoint> {
        nodes.iter().filter_map(|&n| self.node_pos(n)).collect()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing edges of `node` as `(neighbour, length_m)` pairs.
    ///
    /// `node` must exist in the network.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|e| (self.edge_to[e], self.edge_length_m[e]))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the node closest to `pos` by great-circle distance.
    ///
    /// Equidistant nodes resolve to the lowest `NodeId`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::GraphEmpty`] if the network has no nodes.
    /// - [`SpatialError::Resolution`] if `pos` is not finite, or no node in
    ///   the network has a usable coordinate.
    pub fn nearest_node(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        if self.is_empty() {
            return Err(SpatialError::GraphEmpty);
        }
        if !pos.is_finite() {
            return Err(SpatialError::Resolution(format!(
                "query coordinate {pos} is not finite"
            )));
        }

        let query = pos.to_unit_vector();
        let mut candidates = self.spatial_idx.nearest_neighbor_iter_with_distance_2(&query);

        let Some((first, best_d2)) = candidates.next() else {
            return Err(SpatialError::Resolution(format!(
                "none of the {} network nodes has a finite coordinate",
                self.node_count()
            )));
        };
        let limit = best_d2.sqrt() + CHORD_SLACK;

        let mut ties = vec![first.id];
        ties.extend(
            candidates
                .take_while(|(_, d2)| d2.sqrt() <= limit)
                .map(|(e, _)| e.id),
        );

        if ties.len() == 1 {
            return Ok(first.id);
        }
        Ok(pick_nearest(self, pos, ties.into_iter()))
    }

    /// Reference resolver: linear scan over every node.
    ///
    /// Same result and tie-break as [`nearest_node`](Self::nearest_node) in
    /// O(n) per call.
    pub fn nearest_node_scan(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        if self.is_empty() {
            return Err(SpatialError::GraphEmpty);
        }
        if !pos.is_finite() {
            return Err(SpatialError::Resolution(format!(
                "query coordinate {pos} is not finite"
            )));
        }
        let finite = self
            .nodes()
            .filter(|(_, p)| p.is_finite())
            .map(|(id, _)| id);
        let mut finite = finite.peekable();
        if finite.peek().is_none() {
            return Err(SpatialError::Resolution(format!(
                "none of the {} network nodes has a finite coordinate",
                self.node_count()
            )));
        }
        Ok(pick_nearest(self, pos, finite))
    }
}

/// Lowest-id node among `candidates` whose haversine distance to `pos` is
/// within [`TIE_EPS_KM`] of the minimum.  `candidates` must be non-empty.
fn pick_nearest(
    network:    &RoadNetwork,
    pos:        GeoPoint,
    candidates: impl Iterator<Item = NodeId>,
) -> NodeId {
    let scored: Vec<(NodeId, f64)> = candidates
        .map(|id| (id, pos.distance_km(network.node_pos[id.index()])))
        .collect();
    let best = scored
        .iter()
        .map(|&(_, d)| d)
        .fold(f64::INFINITY, f64::min);
    scored
        .iter()
        .filter(|&&(_, d)| d <= best + TIE_EPS_KM)
        .map(|&(id, _)| id)
        .min()
        .unwrap_or(NodeId::INVALID)
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges by source node, constructs the CSR arrays, and bulk-loads the
/// R-tree.
///
/// # Example
///
/// ```
/// use ct_core::GeoPoint;
/// use ct_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(40.740, 31.600));
/// let c = b.add_node(GeoPoint::new(40.742, 31.602));
/// b.add_road(a, c, 270.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:        Vec<GeoPoint>,
    external_ids: Vec<i64>,
    by_external:  HashMap<i64, NodeId>,
    raw_edges:    Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:        Vec::new(),
            external_ids: Vec::new(),
            by_external:  HashMap::new(),
            raw_edges:    Vec::new(),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).  The
    /// node's source id is its `NodeId` index.
    ///
    /// Do not mix with [`add_node_with_id`](Self::add_node_with_id) on one
    /// builder; the generated ids may collide with explicit ones.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let external = self.nodes.len() as i64;
        self.push_node(external, pos)
    }

    /// Add a road node known as `external` in the source data.
    ///
    /// Returns `None`, adding nothing, if `external` is already taken.
    pub fn add_node_with_id(&mut self, external: i64, pos: GeoPoint) -> Option<NodeId> {
        if self.by_external.contains_key(&external) {
            return None;
        }
        Some(self.push_node(external, pos))
    }

    fn push_node(&mut self, external: i64, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.external_ids.push(external);
        self.by_external.entry(external).or_insert(id);
        id
    }

    /// The node added with source id `external`.
    pub fn node_by_external_id(&self, external: i64) -> Option<NodeId> {
        self.by_external.get(&external).copied()
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// `length_m` is the physical length in metres and must be `>= 0`;
    /// Dijkstra is not defined for negative weights.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        debug_assert!(from.index() < self.nodes.len() && to.index() < self.nodes.len());
        debug_assert!(length_m >= 0.0, "negative edge length {length_m}");
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Add edges in **both directions** for an undirected road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Add an undirected road whose length is the great-circle distance
    /// between its endpoints.
    pub fn add_straight_road(&mut self, a: NodeId, b: NodeId) {
        let length_m = self.node_pos(a).distance_km(self.node_pos(b)) * 1_000.0;
        self.add_road(a, b, length_m);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Nodes with a non-finite coordinate stay routable but are left out of
    /// the spatial index, so they are never returned by nearest-node queries.
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        // CSR row pointer.
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, pos)| pos.is_finite())
            .map(|(i, &pos)| NodeEntry {
                point: pos.to_unit_vector(),
                id:    NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_to,
            edge_length_m,
            external_ids: self.external_ids,
            by_external: self.by_external,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
