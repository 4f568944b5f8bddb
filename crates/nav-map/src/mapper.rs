//! GPS ↔ pixel projection between the campus map image and WGS-84.
//!
//! # Model
//!
//! The map image is assumed axis-aligned with the geographic grid, so the
//! projection is two independent linear interpolations:
//!
//! ```text
//! ratio_lat = (lat - tl.lat) / (br.lat - tl.lat)      y = tl.y + ratio_lat * (br.y - tl.y)
//! ratio_lng = (lng - tl.lng) / (br.lng - tl.lng)      x = tl.x + ratio_lng * (br.x - tl.x)
//! ```
//!
//! There is no rotation or skew term.  Pixel output is rounded to 2 decimal
//! places and geographic output to 7 (~1 cm), so repeated projections of the
//! same input render identically.

use nav_core::GeoPoint;
use tracing::warn;

use crate::{CalibrationAnchors, MapError, MapResult, PixelPoint};

const PIXEL_SCALE: f64 = 100.0;
const DEGREE_SCALE: f64 = 10_000_000.0;

#[inline]
fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

/// Projects between GPS coordinates and map-image pixels using validated
/// [`CalibrationAnchors`].
///
/// Construction is the only fallible step: a `CoordinateMapper` that exists
/// always has non-zero denominators on both axes.
#[derive(Clone, Debug)]
pub struct CoordinateMapper {
    anchors: CalibrationAnchors,
}

impl CoordinateMapper {
    /// Validate `anchors` and build a mapper.
    ///
    /// # Errors
    ///
    /// [`MapError::Configuration`] if the anchors are out of order or
    /// coincide on an axis.  Treat this as a startup failure.
    pub fn new(anchors: CalibrationAnchors) -> MapResult<Self> {
        anchors.validate()?;
        Ok(Self { anchors })
    }

    pub fn anchors(&self) -> &CalibrationAnchors {
        &self.anchors
    }

    /// GPS → pixel, rounded to 2 decimal places.  Points outside the
    /// calibrated area extrapolate; use [`project`][Self::project] when an
    /// off-map result should be withheld instead.
    pub fn to_pixel(&self, geo: GeoPoint) -> PixelPoint {
        let (tl, br) = (self.anchors.top_left, self.anchors.bottom_right);

        let ratio_lat = (geo.lat - tl.geo.lat) / (br.geo.lat - tl.geo.lat);
        let ratio_lng = (geo.lng - tl.geo.lng) / (br.geo.lng - tl.geo.lng);

        PixelPoint {
            x: round_to(tl.pixel.x + ratio_lng * (br.pixel.x - tl.pixel.x), PIXEL_SCALE),
            y: round_to(tl.pixel.y + ratio_lat * (br.pixel.y - tl.pixel.y), PIXEL_SCALE),
        }
    }

    /// Pixel → GPS, the inverse of [`to_pixel`][Self::to_pixel], rounded to
    /// 7 decimal places.
    pub fn to_geo(&self, pixel: PixelPoint) -> GeoPoint {
        let (tl, br) = (self.anchors.top_left, self.anchors.bottom_right);

        let ratio_x = (pixel.x - tl.pixel.x) / (br.pixel.x - tl.pixel.x);
        let ratio_y = (pixel.y - tl.pixel.y) / (br.pixel.y - tl.pixel.y);

        GeoPoint {
            lat: round_to(tl.geo.lat + ratio_y * (br.geo.lat - tl.geo.lat), DEGREE_SCALE),
            lng: round_to(tl.geo.lng + ratio_x * (br.geo.lng - tl.geo.lng), DEGREE_SCALE),
        }
    }

    /// `true` iff `geo` lies inside the calibrated rectangle (edges included).
    pub fn is_within_bounds(&self, geo: GeoPoint) -> bool {
        let (tl, br) = (self.anchors.top_left.geo, self.anchors.bottom_right.geo);
        (br.lat..=tl.lat).contains(&geo.lat) && (tl.lng..=br.lng).contains(&geo.lng)
    }

    /// Pixel position for rendering, or `None` when `geo` is off the map.
    pub fn project(&self, geo: GeoPoint) -> Option<PixelPoint> {
        self.is_within_bounds(geo).then(|| self.to_pixel(geo))
    }

    /// Accept `geo` as a destination only if it is inside the calibrated area.
    ///
    /// # Errors
    ///
    /// [`MapError::OutOfBoundsSelection`] otherwise.
    pub fn check_selection(&self, geo: GeoPoint) -> MapResult<GeoPoint> {
        if geo.is_valid() && self.is_within_bounds(geo) {
            Ok(geo)
        } else {
            warn!(%geo, "rejected destination outside calibrated area");
            Err(MapError::OutOfBoundsSelection(geo))
        }
    }

    /// Convert a tap on the map image into a bounds-checked destination.
    pub fn select_pixel(&self, pixel: PixelPoint) -> MapResult<GeoPoint> {
        self.check_selection(self.to_geo(pixel))
    }
}
