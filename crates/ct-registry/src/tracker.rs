//! The register / route query interface.
//!
//! [`Tracker`] borrows the road network for its lifetime and never mutates
//! it; the camera registry is passed in per call.  No I/O happens here, and
//! every failure comes back as a distinct [`RegistryError`] variant.

use ct_core::{Camera, GeoPoint};
use ct_spatial::{DijkstraRouter, ProximityMatcher, RankedCamera, RoadNetwork, Route, Router};

use crate::{CameraRegistry, RegistryError, RegistryResult, TrackerConfig};

/// A computed route and the cameras ranked against it.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteReport {
    pub route:  Route,
    /// On-route cameras first, then nearby ones by ascending distance.
    pub ranked: Vec<RankedCamera>,
}

impl RouteReport {
    pub fn on_route(&self) -> impl Iterator<Item = &RankedCamera> {
        self.ranked.iter().filter(|r| r.on_route)
    }

    pub fn nearby(&self) -> impl Iterator<Item = &RankedCamera> {
        self.ranked.iter().filter(|r| !r.on_route)
    }
}

/// Camera registration and route analysis over one road network.
///
/// # Example
///
/// ```
/// use ct_core::GeoPoint;
/// use ct_registry::{CameraRegistry, Tracker};
/// use ct_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(40.740, 31.600));
/// let c = b.add_node(GeoPoint::new(40.742, 31.602));
/// b.add_straight_road(a, c);
/// let net = b.build();
///
/// let tracker = Tracker::new(&net);
/// let mut cams = CameraRegistry::new();
/// tracker.register_camera(&mut cams, "north", 40.740, 31.600).unwrap();
/// tracker.register_camera(&mut cams, "south", 40.742, 31.602).unwrap();
/// let report = tracker.compute_route(&cams, "north", "south").unwrap();
/// assert_eq!(report.route.nodes, vec![a, c]);
/// ```
pub struct Tracker<'n, R: Router = DijkstraRouter> {
    network: &'n RoadNetwork,
    router:  R,
    matcher: ProximityMatcher,
}

impl<'n> Tracker<'n, DijkstraRouter> {
    /// Tracker with Dijkstra routing and the default 0.1 km buffer.
    pub fn new(network: &'n RoadNetwork) -> Self {
        Self::with_router(network, DijkstraRouter)
    }

    /// Tracker with Dijkstra routing and the buffer from `config`.
    pub fn from_config(network: &'n RoadNetwork, config: &TrackerConfig) -> Self {
        Self::new(network).buffer_km(config.buffer_km)
    }
}

impl<'n, R: Router> Tracker<'n, R> {
    pub fn with_router(network: &'n RoadNetwork, router: R) -> Self {
        Self { network, router, matcher: ProximityMatcher::default() }
    }

    /// Override the proximity buffer, km.
    pub fn buffer_km(mut self, buffer_km: f64) -> Self {
        self.matcher = ProximityMatcher::new(buffer_km);
        self
    }

    /// Snap `(lat, lon)` to the nearest road node and append a camera named
    /// `name` (trimmed) to `registry`.
    ///
    /// `registry` is only modified on success.
    ///
    /// # Errors
    ///
    /// `EmptyName`, `DuplicateName`, or the resolver's `GraphEmpty` /
    /// `Resolution` (wrapped in [`RegistryError::Spatial`]).
    pub fn register_camera(
        &self,
        registry: &mut CameraRegistry,
        name:     &str,
        lat:      f64,
        lon:      f64,
    ) -> RegistryResult<Camera> {
        let name = registry.check_name(name)?;
        let pos = GeoPoint::new(lat, lon);
        let node = self.network.nearest_node(pos)?;
        let mut camera = Camera::new(name, pos, node);
        if let Some(external) = self.network.external_id(node) {
            camera = camera.with_node_ref(external);
        }
        let camera = registry.insert(camera)?;
        Ok(camera.clone())
    }

    /// Route between the cameras named `start` and `end` and rank every
    /// registered camera against the result.  Names are trimmed, as on
    /// registration.
    ///
    /// # Errors
    ///
    /// `SameEndpoints`, `UnknownCamera`, or the router's `InvalidNode` /
    /// `NoRoute` (wrapped in [`RegistryError::Spatial`]).
    pub fn compute_route(&self, registry: &CameraRegistry, start: &str, end: &str) -> RegistryResult<RouteReport> {
        let (start, end) = (start.trim(), end.trim());
        if start == end {
            return Err(RegistryError::SameEndpoints(start.to_owned()));
        }
        let lookup = |name: &str| {
            registry
                .get(name)
                .ok_or_else(|| RegistryError::UnknownCamera(name.to_owned()))
        };
        let start = lookup(start)?;
        let end = lookup(end)?;
        self.route_between(registry, start, end)
    }

    /// Like [`compute_route`](Self::compute_route) for cameras already in
    /// hand.  Endpoints are compared by name.
    pub fn route_between(&self, registry: &CameraRegistry, start: &Camera, end: &Camera) -> RegistryResult<RouteReport> {
        if start.name == end.name {
            return Err(RegistryError::SameEndpoints(start.name.clone()));
        }
        let route = self.router.route(self.network, start.node, end.node)?;
        let ranked = self.matcher.rank(self.network, &route.nodes, registry.cameras());
        Ok(RouteReport { route, ranked })
    }
}
