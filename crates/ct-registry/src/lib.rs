//! `ct-registry` — the camera list and the queries that run over it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`registry`]| `CameraRegistry` — ordered, uniquely named cameras       |
//! | [`tracker`] | `Tracker` (register / route), `RouteReport`              |
//! | [`store`]   | `CameraStore` — JSON file persistence                    |
//! | [`config`]  | `TrackerConfig`                                          |
//! | [`error`]   | `RegistryError`, `RegistryResult<T>`                     |
//!
//! # Flow
//!
//! ```text
//! CameraStore::load(network) ──► CameraRegistry ◄── Tracker::register_camera
//!                                      │                 (nearest_node)
//!                                      ▼
//!                          Tracker::compute_route ──► Router ──► ProximityMatcher
//!                                      │
//!                                      ▼
//!                                 RouteReport
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod tracker;


pub use config::{DEFAULT_DATA_FILE, TrackerConfig};
pub use error::{RegistryError, RegistryResult};
pub use registry::CameraRegistry;
pub use store::{CameraStore, from_json, to_json};
pub use tracker::{RouteReport, Tracker};
