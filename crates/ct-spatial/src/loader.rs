//! CSV network loader, enabled with the `csv` Cargo feature.
//!
//! # CSV format
//!
//! Two files.  Nodes, one row per node, any integer id scheme (OSM ids work):
//!
//! ```csv
//! id,lat,lon
//! 101,40.740,31.600
//! 102,40.741,31.601
//! ```
//!
//! Edges, one row per road segment:
//!
//! ```csv
//! from,to,length_m,oneway
//! 101,102,140.2,false
//! 102,103,,true
//! ```
//!
//! An empty `length_m` is filled with the great-circle distance between the
//! endpoints.  `oneway` may be omitted entirely (default `false`); two-way
//! segments add both directions.
//!
//! Nodes get dense [`NodeId`]s in file order; the `id` column is kept as
//! each node's source id ([`RoadNetwork::node_by_external_id`]), which stays
//! stable when rows are reordered.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ct_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  i64,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:     i64,
    to:       i64,
    length_m: Option<f64>,
    #[serde(default)]
    oneway:   bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road network from a nodes CSV and an edges CSV.
pub fn load_network_csv(nodes: &Path, edges: &Path) -> SpatialResult<RoadNetwork> {
    let nodes = std::fs::File::open(nodes)?;
    let edges = std::fs::File::open(edges)?;
    load_network_readers(nodes, edges)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_network_readers<N: Read, E: Read>(nodes: N, edges: E) -> SpatialResult<RoadNetwork> {
    let mut builder = RoadNetworkBuilder::new();

    for result in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        if builder.add_node_with_id(row.id, GeoPoint::new(row.lat, row.lon)).is_none() {
            return Err(SpatialError::Parse(format!("duplicate node id {}", row.id)));
        }
    }

    for result in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let from = lookup(&builder, row.from)?;
        let to   = lookup(&builder, row.to)?;

        let length_m = match row.length_m {
            Some(len) if len.is_finite() && len >= 0.0 => len,
            Some(len) => {
                return Err(SpatialError::Parse(format!(
                    "edge {} -> {}: invalid length {len}",
                    row.from, row.to
                )));
            }
            None => builder.node_pos(from).distance_km(builder.node_pos(to)) * 1_000.0,
        };

        if row.oneway {
            builder.add_directed_edge(from, to, length_m);
        } else {
            builder.add_road(from, to, length_m);
        }
    }

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lookup(builder: &RoadNetworkBuilder, raw: i64) -> SpatialResult<NodeId> {
    builder
        .node_by_external_id(raw)
        .ok_or_else(|| SpatialError::Parse(format!("edge references unknown node id {raw}")))
}
