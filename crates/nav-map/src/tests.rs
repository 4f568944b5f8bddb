//! Unit tests for nav-map.

use nav_core::GeoPoint;

use crate::{Anchor, CalibrationAnchors, CoordinateMapper, PixelPoint};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn campus() -> CoordinateMapper {
    CoordinateMapper::new(CalibrationAnchors::FLAME_CAMPUS).unwrap()
}

fn anchors(tl: (f64, f64, f64, f64), br: (f64, f64, f64, f64)) -> CalibrationAnchors {
    CalibrationAnchors {
        top_left: Anchor {
            pixel: PixelPoint::new(tl.0, tl.1),
            geo:   GeoPoint::new(tl.2, tl.3),
        },
        bottom_right: Anchor {
            pixel: PixelPoint::new(br.0, br.1),
            geo:   GeoPoint::new(br.2, br.3),
        },
    }
}

const CAMPUS_SVG: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="2646px" height="3910" viewBox="0 0 2646 3910">
  <rect x="0" y="0" width="10" height="10"/>
</svg>"#;

// ── CoordinateMapper ──────────────────────────────────────────────────────────

#[cfg(test)]
mod mapper {
    use super::*;
    use crate::MapError;

    #[test]
    fn anchors_project_onto_their_pixels() {
        let m = campus();
        let a = CalibrationAnchors::FLAME_CAMPUS;
        assert_eq!(m.to_pixel(a.top_left.geo), a.top_left.pixel);
        assert_eq!(m.to_pixel(a.bottom_right.geo), a.bottom_right.pixel);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let m = campus();
        let a = CalibrationAnchors::FLAME_CAMPUS;
        let (tl, br) = (a.top_left.geo, a.bottom_right.geo);
        for i in 0..10 {
            for j in 0..10 {
                // Cell centres of a 10×10 grid over the calibrated area.
                let geo = GeoPoint::new(
                    tl.lat + (br.lat - tl.lat) * (i as f64 + 0.5) / 10.0,
                    tl.lng + (br.lng - tl.lng) * (j as f64 + 0.5) / 10.0,
                );
                assert!(m.is_within_bounds(geo));
                let back = m.to_geo(m.to_pixel(geo));
                assert!((back.lat - geo.lat).abs() <= 1e-6, "{geo} -> {back}");
                assert!((back.lng - geo.lng).abs() <= 1e-6, "{geo} -> {back}");
            }
        }
    }

    #[test]
    fn pixel_output_is_rounded_to_two_places() {
        let p = campus().to_pixel(GeoPoint::new(18.5226207, 73.7307949));
        assert_eq!((p.x * 100.0).round() / 100.0, p.x);
        assert_eq!((p.y * 100.0).round() / 100.0, p.y);
    }

    #[test]
    fn south_is_down_and_east_is_right() {
        let m = campus();
        let north = m.to_pixel(GeoPoint::new(18.525, 73.730));
        let south = m.to_pixel(GeoPoint::new(18.520, 73.730));
        let east = m.to_pixel(GeoPoint::new(18.525, 73.733));
        assert!(south.y > north.y);
        assert!(east.x > north.x);
    }

    #[test]
    fn bounds_include_anchors_and_exclude_far_north() {
        let m = campus();
        let a = CalibrationAnchors::FLAME_CAMPUS;
        assert!(m.is_within_bounds(a.top_left.geo));
        assert!(m.is_within_bounds(a.bottom_right.geo));
        let north = GeoPoint::new(a.top_left.geo.lat + 1.0, a.top_left.geo.lng);
        assert!(!m.is_within_bounds(north));
    }

    #[test]
    fn project_withholds_off_map_points() {
        let m = campus();
        assert!(m.project(GeoPoint::new(18.5226207, 73.7307949)).is_some());
        assert!(m.project(GeoPoint::new(18.60, 73.7307949)).is_none());
    }

    #[test]
    fn selection_outside_bounds_is_rejected() {
        let m = campus();
        let err = m.check_selection(GeoPoint::new(18.60, 73.73)).unwrap_err();
        assert!(matches!(err, MapError::OutOfBoundsSelection(_)));
        assert!(m.check_selection(GeoPoint::new(18.5245123, 73.7298456)).is_ok());
    }

    #[test]
    fn select_pixel_converts_tap_to_geo() {
        let m = campus();
        let a = CalibrationAnchors::FLAME_CAMPUS;
        let geo = m.select_pixel(a.top_left.pixel).unwrap();
        assert_eq!(geo, a.top_left.geo);
        assert!(m.select_pixel(PixelPoint::new(-500.0, 10.0)).is_err());
    }

    #[test]
    fn coincident_latitudes_are_a_configuration_error() {
        let bad = anchors((0.0, 0.0, 18.5, 73.7), (100.0, 100.0, 18.5, 73.8));
        assert!(matches!(CoordinateMapper::new(bad), Err(MapError::Configuration(_))));
    }

    #[test]
    fn coincident_pixels_are_a_configuration_error() {
        let bad = anchors((50.0, 0.0, 18.6, 73.7), (50.0, 100.0, 18.5, 73.8));
        assert!(matches!(CoordinateMapper::new(bad), Err(MapError::Configuration(_))));
    }

    #[test]
    fn inverted_diagonal_is_a_configuration_error() {
        let bad = anchors((0.0, 0.0, 18.5, 73.8), (100.0, 100.0, 18.6, 73.7));
        assert!(CoordinateMapper::new(bad).is_err());
    }
}

// ── MapAsset ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod asset {
    use std::io::Write;

    use super::*;
    use crate::{FileAssetLoader, MapAsset, MapAssetLoader, MapError};

    #[test]
    fn reads_explicit_svg_dimensions() {
        let asset = MapAsset::from_bytes("mem://map.svg", CAMPUS_SVG.as_bytes().to_vec());
        assert_eq!(asset.width, Some(2646.0));
        assert_eq!(asset.height, Some(3910.0));
    }

    #[test]
    fn falls_back_to_view_box() {
        let svg = r#"<svg viewBox="0 0 800 600"></svg>"#;
        let asset = MapAsset::from_bytes("mem://map.svg", svg.as_bytes().to_vec());
        assert_eq!(asset.width, Some(800.0));
        assert_eq!(asset.height, Some(600.0));
    }

    #[test]
    fn contains_pixel_uses_dimensions() {
        let asset = MapAsset::from_bytes("mem://map.svg", CAMPUS_SVG.as_bytes().to_vec());
        assert!(asset.contains_pixel(PixelPoint::new(132.75, 133.55)));
        assert!(!asset.contains_pixel(PixelPoint::new(3000.0, 10.0)));
        assert!(!asset.contains_pixel(PixelPoint::new(10.0, -1.0)));
    }

    #[test]
    fn unknown_dimensions_accept_everything() {
        let asset = MapAsset::from_bytes("mem://map.png", vec![0x89, 0x50, 0x4e, 0x47]);
        assert!(asset.width.is_none());
        assert!(asset.contains_pixel(PixelPoint::new(1e6, 1e6)));
    }

    #[test]
    fn file_loader_resolves_url_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("CampusMap.svg")).unwrap();
        f.write_all(CAMPUS_SVG.as_bytes()).unwrap();

        let mut loader = FileAssetLoader::new(dir.path());
        let asset = loader
            .fetch("https://raw.githubusercontent.com/Jaycubic/FLAMECampusSVG/main/CampusMap.svg")
            .unwrap();
        assert_eq!(asset.width, Some(2646.0));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = FileAssetLoader::new(dir.path());
        let err = loader.fetch("https://example.org/missing.svg").unwrap_err();
        assert!(matches!(err, MapError::Load { .. }));
    }
}

// ── LocationDirectory ─────────────────────────────────────────────────────────

#[cfg(test)]
mod directory {
    use std::io::Cursor;

    use super::*;
    use crate::{LocationDirectory, MapError, load_directory_csv, load_directory_reader};

    const LOCATIONS_CSV: &str = "\
name,description,lat,lng\n\
Main Academic Block,Central academic building,18.5226207,73.7307949\n\
Library,Central library and study area,18.5230157,73.7305252\n\
Cafeteria,Main dining facility,18.5228207,73.7310949\n\
";

    #[test]
    fn loads_rows_in_order() {
        let dir = load_directory_reader(Cursor::new(LOCATIONS_CSV), None).unwrap();
        assert_eq!(dir.len(), 3);
        let names: Vec<&str> = dir.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Main Academic Block", "Library", "Cafeteria"]);
        assert_eq!(dir.get(nav_core::LocationId(1)).unwrap().name, "Library");
    }

    #[test]
    fn search_matches_name_or_description() {
        let dir = load_directory_reader(Cursor::new(LOCATIONS_CSV), None).unwrap();
        let hits: Vec<&str> = dir.search("CENTRAL").iter().map(|l| l.name.as_str()).collect();
        assert_eq!(hits, ["Main Academic Block", "Library"]);
        assert_eq!(dir.search("dining").len(), 1);
        assert!(dir.search("   ").is_empty());
    }

    #[test]
    fn find_is_case_insensitive_and_exact() {
        let dir = load_directory_reader(Cursor::new(LOCATIONS_CSV), None).unwrap();
        assert!(dir.find("library").is_some());
        assert!(dir.find("lib").is_none());
    }

    #[test]
    fn mapper_rejects_off_campus_rows() {
        let csv = "name,description,lat,lng\nAirport,Far away,18.58,73.92\n";
        let err = load_directory_reader(Cursor::new(csv), Some(&campus())).unwrap_err();
        assert!(matches!(err, MapError::Directory(_)));
    }

    #[test]
    fn malformed_row_is_a_csv_error() {
        let csv = "name,description,lat,lng\nLibrary,Books,not-a-number,73.73\n";
        let err = load_directory_reader(Cursor::new(csv), None).unwrap_err();
        assert!(matches!(err, MapError::Csv(_)));
    }

    #[test]
    fn push_rejects_empty_name() {
        let mut dir = LocationDirectory::new();
        assert!(dir.push("  ", "nothing", GeoPoint::new(18.52, 73.73)).is_err());
        assert!(dir.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.csv");
        std::fs::write(&path, LOCATIONS_CSV).unwrap();
        let loaded = load_directory_csv(&path, Some(&campus())).unwrap();
        assert_eq!(loaded.len(), 3);
    }
}
