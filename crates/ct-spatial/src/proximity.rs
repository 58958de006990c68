//! Rank registered cameras by their relation to a computed route.
//!
//! A camera is **on** the route when its snapped node is one of the route's
//! nodes (an id comparison, independent of graph contents).  Otherwise it is
//! **near** the route when the great-circle distance from its node to the
//! closest route node is within the buffer, and dropped when it is not.
//!
//! Output order: every on-route camera before every near camera; within each
//! group ascending distance, then registry order.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ct_core::{Camera, GeoPoint, NodeId};

use crate::network::RoadNetwork;

#[cfg(feature = "fx-hash")]
type NodeSet = rustc_hash::FxHashSet<NodeId>;
#[cfg(not(feature = "fx-hash"))]
type NodeSet = HashSet<NodeId>;

/// Default proximity buffer, kilometres.
pub const DEFAULT_BUFFER_KM: f64 = 0.1;

/// A camera classified against a route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedCamera {
    pub camera: Camera,
    pub on_route: bool,
    /// Distance from the camera's node to the nearest route node, km.
    /// Exactly `0.0` when `on_route`.
    pub distance_to_route_km: f64,
}

impl RankedCamera {
    /// Short human-readable relation to the route.
    pub fn status(&self) -> String {
        if self.on_route {
            "on route".to_owned()
        } else {
            format!("{:.2} km away", self.distance_to_route_km)
        }
    }
}

impl std::fmt::Display for RankedCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.camera.name, self.status())
    }
}

/// Classifies and ranks cameras against a route.
///
/// # Example
///
/// ```
/// use ct_core::{Camera, GeoPoint};
/// use ct_spatial::{DijkstraRouter, ProximityMatcher, RoadNetworkBuilder, Router};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(40.740, 31.600));
/// let c = b.add_node(GeoPoint::new(40.742, 31.602));
/// b.add_straight_road(a, c);
/// let net = b.build();
///
/// let route = DijkstraRouter.route(&net, a, c).unwrap();
/// let cams = vec![Camera::new("gate", GeoPoint::new(40.742, 31.602), c)];
/// let ranked = ProximityMatcher::default().rank(&net, &route.nodes, &cams);
/// assert!(ranked[0].on_route);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityMatcher {
    /// Cameras farther than this from every route node are dropped, km.
    pub buffer_km: f64,
}

impl Default for ProximityMatcher {
    fn default() -> Self {
        Self { buffer_km: DEFAULT_BUFFER_KM }
    }
}

impl ProximityMatcher {
    pub fn new(buffer_km: f64) -> Self {
        Self { buffer_km }
    }

    /// Classify every camera against `route` and return the survivors in
    /// ranked order.  An empty route or camera list gives an empty result.
    pub fn rank(&self, network: &RoadNetwork, route: &[NodeId], cameras: &[Camera]) -> Vec<RankedCamera> {
        if route.is_empty() || cameras.is_empty() {
            return Vec::new();
        }

        let members: NodeSet = route.iter().copied().collect();
        // Route nodes missing from the graph contribute no distance.
        let route_pos = network.path_coords(route);

        let classify = |cam: &Camera| self.classify(network, &members, &route_pos, cam);

        #[cfg(not(feature = "parallel"))]
        let mut ranked: Vec<RankedCamera> = cameras.iter().filter_map(classify).collect();

        #[cfg(feature = "parallel")]
        let mut ranked: Vec<RankedCamera> = cameras.par_iter().filter_map(classify).collect();

        // Stable: equal keys keep registry order.
        ranked.sort_by(|a, b| {
            b.on_route
                .cmp(&a.on_route)
                .then_with(|| a.distance_to_route_km.total_cmp(&b.distance_to_route_km))
        });
        ranked
    }

    fn classify(
        &self,
        network:   &RoadNetwork,
        members:   &NodeSet,
        route_pos: &[GeoPoint],
        cam:       &Camera,
    ) -> Option<RankedCamera> {
        if members.contains(&cam.node) {
            return Some(RankedCamera {
                camera: cam.clone(),
                on_route: true,
                distance_to_route_km: 0.0,
            });
        }

        let cam_pos = network.node_pos(cam.node)?;
        let d = route_pos
            .iter()
            .map(|&p| cam_pos.distance_km(p))
            .fold(f64::INFINITY, f64::min);

        (d <= self.buffer_km).then(|| RankedCamera {
            camera: cam.clone(),
            on_route: false,
            distance_to_route_km: d,
        })
    }
}

/// [`ProximityMatcher::rank`] with an explicit buffer.
pub fn rank_cameras(
    network:   &RoadNetwork,
    route:     &[NodeId],
    cameras:   &[Camera],
    buffer_km: f64,
) -> Vec<RankedCamera> {
    ProximityMatcher::new(buffer_km).rank(network, route, cameras)
}
