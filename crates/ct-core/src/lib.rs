//! `ct-core` — foundational types for the `camtrack` workspace.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and no mandatory external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`ids`]    | `NodeId`                                           |
//! | [`geo`]    | `GeoPoint`, haversine distance, centroid           |
//! | [`camera`] | `Camera` — a named observation point on the graph  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod camera;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use camera::Camera;
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use ids::NodeId;
