//! Unit tests for nav-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LocationId, WatchId};

    #[test]
    fn next_increments() {
        assert_eq!(WatchId(0).next(), WatchId(1));
        assert_eq!(LocationId(7).next().index(), 8);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(WatchId::INVALID.0, u32::MAX);
        assert_eq!(LocationId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(WatchId(3).to_string(), "WatchId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{AVERAGE_WALKING_SPEED_MPS, GeoPoint, compass_point, walking_seconds};

    const ACADEMIC_BLOCK: GeoPoint = GeoPoint::new(18.5226207, 73.7307949);
    const LIBRARY: GeoPoint = GeoPoint::new(18.5245123, 73.7298456);

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(ACADEMIC_BLOCK.distance_m(ACADEMIC_BLOCK), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = ACADEMIC_BLOCK.distance_m(LIBRARY);
        let ba = LIBRARY.distance_m(ACADEMIC_BLOCK);
        assert!((ab - ba).abs() < 1e-9, "{ab} vs {ba}");
    }

    #[test]
    fn campus_scale_distance() {
        // ~210 m north plus ~100 m west.
        let d = ACADEMIC_BLOCK.distance_m(LIBRARY);
        assert!((225.0..240.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(GeoPoint::try_new(18.5, 73.7).is_ok());
        assert!(GeoPoint::try_new(90.5, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, -180.1).is_err());
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(origin.bearing_deg(GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
        assert!((origin.bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_deg(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn compass_sectors() {
        assert_eq!(compass_point(0.0), "north");
        assert_eq!(compass_point(350.0), "north");
        assert_eq!(compass_point(45.0), "northeast");
        assert_eq!(compass_point(200.0), "south");
        assert_eq!(compass_point(-90.0), "west");
    }

    #[test]
    fn walking_time() {
        assert!((walking_seconds(139.0, AVERAGE_WALKING_SPEED_MPS) - 100.0).abs() < 1e-9);
        assert_eq!(walking_seconds(-5.0, 1.39), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{NavConfig, Timestamp};

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp(1_000);
        assert_eq!(t + 500, Timestamp(1_500));
        assert_eq!(t.offset(250), Timestamp(1_250));
        assert_eq!(Timestamp(1_500) - Timestamp(1_000), 500);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Timestamp(10).since(Timestamp(20)), 0);
    }

    #[test]
    fn offset_saturates_at_end_of_clock() {
        let late = Timestamp(u64::MAX - 10);
        assert_eq!(late.offset(100), Timestamp(u64::MAX));
        assert_eq!(late + 100, Timestamp(u64::MAX));
        assert_eq!(late + 5, Timestamp(u64::MAX - 5));
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = NavConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.arrival_radius_m, 10.0);
        assert_eq!(cfg.walking_speed_mps, 1.39);
    }

    #[test]
    fn config_rejects_zero_speed() {
        let cfg = NavConfig { walking_speed_mps: 0.0, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_rejects_zero_stale_window() {
        let cfg = NavConfig { stale_after_ms: 0, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn jitter_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.jitter(2.5);
            assert!((-2.5..=2.5).contains(&v));
        }
        assert_eq!(rng.jitter(0.0), 0.0);
    }
}

#[cfg(test)]
mod format {
    use crate::{format_distance, format_duration};

    #[test]
    fn distances() {
        assert_eq!(format_distance(850.4), "850m");
        assert_eq!(format_distance(1_234.0), "1.2km");
        assert_eq!(format_distance(f64::NAN), "--");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(45.0), "45s");
        assert_eq!(format_duration(420.0), "7min");
        assert_eq!(format_duration(3_900.0), "1h 05min");
        assert_eq!(format_duration(-1.0), "--");
    }
}
