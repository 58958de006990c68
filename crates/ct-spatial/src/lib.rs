//! `ct-spatial` — road network, nearest-node resolution, routing, and
//! route proximity.
//!
//! Every operation here is a read-only computation over an immutable
//! [`RoadNetwork`]; nothing logs, retries, or caches between calls.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`        |
//! | [`router`]    | `Router` trait, `Route`, `DijkstraRouter`                 |
//! | [`proximity`] | `ProximityMatcher`, `RankedCamera`                        |
//! | [`loader`]    | `load_network_csv` (feature = `"csv"` only)               |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `csv`      | Enables the CSV network loader.                           |
//! | `parallel` | Proximity distance scan on Rayon.                         |
//! | `fx-hash`  | FxHash for the route membership set.                      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod network;
pub mod proximity;
pub mod router;

#[cfg(feature = "csv")]
pub mod loader;


pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use proximity::{DEFAULT_BUFFER_KM, ProximityMatcher, RankedCamera, rank_cameras};
pub use router::{DijkstraRouter, Route, Router};

#[cfg(feature = "csv")]
pub use loader::{load_network_csv, load_network_readers};
