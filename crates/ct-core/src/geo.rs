//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Camera positions are clicked on
//! a map and compared against road nodes a few metres apart, so the extra
//! precision over `f32` is kept end to end.
//!
//! # Preconditions
//!
//! Every function here assumes WGS-84 degrees with `|lat| <= 90` and
//! `|lon| <= 180`.  Out-of-range input is not checked and produces an
//! unspecified (but finite for finite input) distance.

/// Mean Earth radius used by the haversine formula, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// `true` if both components are finite (no NaN / ±inf).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Position on the unit sphere as `[x, y, z]`.
    ///
    /// Euclidean (chord) distance between two such vectors is a monotone
    /// function of great-circle distance, which is what lets the R-tree in
    /// `ct-spatial` answer nearest-node queries in 3-D.
    pub fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Arithmetic mean of a set of points, or `None` for an empty set.
    ///
    /// A plain lat/lon average: fine for centring a city-scale map, wrong
    /// across the antimeridian.
    pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lat, lon) = points
            .iter()
            .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
        Some(GeoPoint::new(lat / n, lon / n))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between `(lat1, lon1)` and `(lat2, lon2)`
/// in kilometres, on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// Symmetric, and exactly `0.0` when both coordinates are identical.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // asin form; clamp guards against a > 1 from rounding near antipodes.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}
