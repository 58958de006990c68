//! Unit tests for ct-core primitives.

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert!(id.is_valid());
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinel() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert!(!NodeId::INVALID.is_valid());
        assert_eq!(NodeId::INVALID.to_string(), "NodeId(invalid)");
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, haversine_km};

    #[test]
    fn zero_distance_is_exact() {
        let p = GeoPoint::new(40.740, 31.600);
        assert_eq!(p.distance_km(p), 0.0);
        assert_eq!(haversine_km(-33.9, 151.2, -33.9, 151.2), 0.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            (GeoPoint::new(40.740, 31.600), GeoPoint::new(40.742, 31.602)),
            (GeoPoint::new(-12.5, 130.8), GeoPoint::new(51.5, -0.12)),
            (GeoPoint::new(89.9, 0.0), GeoPoint::new(-89.9, 179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.distance_km(b), b.distance_km(a), "{a} <-> {b}");
        }
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.19 km on a 6371 km sphere
        let d = haversine_km(40.0, 31.0, 41.0, 31.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn small_city_offset() {
        // 0.001° of latitude ≈ 111 m
        let d = haversine_km(40.740, 31.600, 40.741, 31.600);
        assert!((d - 0.1112).abs() < 0.001, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * 6_371.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn unit_vector_has_unit_length() {
        let v = GeoPoint::new(40.74, 31.6).to_unit_vector();
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-12);
    }

    #[test]
    fn centroid() {
        assert!(GeoPoint::centroid(&[]).is_none());
        let c = GeoPoint::centroid(&[GeoPoint::new(40.0, 30.0), GeoPoint::new(42.0, 32.0)]).unwrap();
        assert_eq!(c, GeoPoint::new(41.0, 31.0));
    }

    #[test]
    fn finiteness() {
        assert!(GeoPoint::new(1.0, 2.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!GeoPoint::new(1.0, f64::INFINITY).is_finite());
    }
}

#[cfg(test)]
mod camera {
    use crate::{Camera, GeoPoint, NodeId};

    #[test]
    fn accessors() {
        let c = Camera::new("Gate", GeoPoint::new(40.74, 31.60), NodeId(3));
        assert_eq!(c.name, "Gate");
        assert_eq!(c.lat(), 40.74);
        assert_eq!(c.lon(), 31.60);
        assert_eq!(c.node, NodeId(3));
        assert_eq!(c.node_ref, 3);
    }

    #[test]
    fn node_ref_override() {
        let c = Camera::new("Gate", GeoPoint::new(40.74, 31.60), NodeId(3)).with_node_ref(11_234_567_890);
        assert_eq!(c.node, NodeId(3));
        assert_eq!(c.node_ref, 11_234_567_890);
        assert_eq!(c.to_string(), "Gate (40.740000, 31.600000) @ node 11234567890");
    }
}
