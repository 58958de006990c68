//! JSON persistence for the camera list.
//!
//! # File format
//!
//! A JSON array in registration order, one object per camera:
//!
//! ```json
//! [
//!   { "name": "Town Hall", "x": 31.6061, "y": 40.7361, "node_id": 1735228342 }
//! ]
//! ```
//!
//! `x` is longitude, `y` is latitude.  `node_id` is the road node's id in
//! the network's source data (e.g. the OSM node id), not its position in a
//! loaded network, so a file stays valid when the network is rebuilt.  It
//! is written as an integer; on read a numeric string is accepted too.
//! Non-ASCII names are written as UTF-8, not `\u` escapes.
//!
//! Loading maps each `node_id` back through the network.  A camera whose
//! node is not in the network is kept (and written back unchanged) with
//! [`NodeId::INVALID`], so routing from it fails with `InvalidNode`.

use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use ct_core::{Camera, GeoPoint, NodeId};

use ct_spatial::RoadNetwork;

use crate::{CameraRegistry, RegistryResult};

// ── JSON record ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct CameraRecord {
    name: String,
    x:    f64,
    y:    f64,
    #[serde(deserialize_with = "node_id_from_int_or_str")]
    node_id: i64,
}

impl From<&Camera> for CameraRecord {
    fn from(c: &Camera) -> Self {
        Self { name: c.name.clone(), x: c.pos.lon, y: c.pos.lat, node_id: c.node_ref }
    }
}

impl CameraRecord {
    fn into_camera(self, network: &RoadNetwork) -> Camera {
        let node = network.node_by_external_id(self.node_id).unwrap_or_else(|| {
            tracing::warn!(
                camera = %self.name,
                node_id = self.node_id,
                "stored node is not in the road network"
            );
            NodeId::INVALID
        });
        Camera::new(self.name, GeoPoint::new(self.y, self.x), node).with_node_ref(self.node_id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNodeId {
    Int(i64),
    Text(String),
}

fn node_id_from_int_or_str<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match RawNodeId::deserialize(d)? {
        RawNodeId::Int(n) => Ok(n),
        RawNodeId::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("node_id {s:?} is not a node id"))),
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Reads and writes a [`CameraRegistry`] as a JSON file.
#[derive(Clone, Debug)]
pub struct CameraStore {
    path: PathBuf,
}

impl CameraStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry, resolving stored node ids against `network`.  A
    /// missing file, or a document whose top level is not an array, yields
    /// an empty registry.
    ///
    /// # Errors
    ///
    /// I/O and JSON errors, and naming errors if the file holds an empty or
    /// duplicated camera name.
    pub fn load(&self, network: &RoadNetwork) -> RegistryResult<CameraRegistry> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "camera file not found, starting empty");
            return Ok(CameraRegistry::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let registry = from_json(&contents, network)?;
        tracing::debug!(path = %self.path.display(), cameras = registry.len(), "loaded cameras");
        Ok(registry)
    }

    /// Write the registry, replacing the file.  Parent directories are
    /// created if needed.
    pub fn save(&self, registry: &CameraRegistry) -> RegistryResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, to_json(registry)?)?;
        tracing::debug!(path = %self.path.display(), cameras = registry.len(), "saved cameras");
        Ok(())
    }
}

/// Pretty-printed JSON for `registry`, in the on-disk format.
pub fn to_json(registry: &CameraRegistry) -> RegistryResult<String> {
    let records: Vec<CameraRecord> = registry.iter().map(CameraRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse the on-disk format against `network`.  A non-array document
/// yields an empty registry.
pub fn from_json(json: &str, network: &RoadNetwork) -> RegistryResult<CameraRegistry> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        tracing::warn!("camera file is not a JSON array, ignoring its contents");
        return Ok(CameraRegistry::new());
    }
    let records: Vec<CameraRecord> = serde_json::from_value(value)?;
    CameraRegistry::from_cameras(records.into_iter().map(|r| r.into_camera(network)).collect())
}
