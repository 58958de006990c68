//! Plain-text rendering of cameras and route reports.

use std::fmt::Write;

use ct_core::Camera;
use ct_registry::{CameraRegistry, RouteReport, TrackerConfig};
use ct_spatial::RoadNetwork;

/// `"3. Gate  lat 40.74000  lon 31.60000  node 1735228342"`, flagged when the
/// node is missing from the loaded network.
pub fn camera_line(index: usize, camera: &Camera) -> String {
    let mut line = format!(
        "{index}. {}  lat {:.5}  lon {:.5}  node {}",
        camera.name,
        camera.lat(),
        camera.lon(),
        camera.node_ref
    );
    if !camera.node.is_valid() {
        line.push_str("  (not in road network)");
    }
    line
}

pub fn camera_table(cameras: &CameraRegistry) -> String {
    if cameras.is_empty() {
        return "no cameras registered\n".to_owned();
    }
    let mut out = format!("{} camera(s)\n", cameras.len());
    for (i, camera) in cameras.iter().enumerate() {
        let _ = writeln!(out, "{}", camera_line(i + 1, camera));
    }
    out
}

pub fn route_report(network: &RoadNetwork, report: &RouteReport, config: &TrackerConfig) -> String {
    let route = &report.route;
    let mut out = format!(
        "route: {} node(s), {:.2} km\n",
        route.nodes.len(),
        route.total_length_km()
    );
    if let Some(center) = route.centroid(network) {
        let _ = writeln!(out, "center: {center}");
    }

    if report.ranked.is_empty() {
        let _ = writeln!(out, "no cameras within {:.2} km of the route", config.buffer_km);
        return out;
    }
    let _ = writeln!(out, "cameras:");
    for (i, ranked) in report.ranked.iter().enumerate() {
        let _ = writeln!(out, "  {}. {ranked}", i + 1);
    }
    out
}
