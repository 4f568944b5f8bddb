//! Pixel coordinates and the two-anchor calibration of a map image.

use std::fmt;

use nav_core::GeoPoint;

use crate::{MapError, MapResult};

/// A position in the map image's native coordinate space (origin top-left,
/// `y` increasing downward).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.x, self.y)
    }
}

/// One calibrated (pixel, GPS) pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub pixel: PixelPoint,
    pub geo:   GeoPoint,
}

/// The north-west and south-east anchors of an axis-aligned map image.
///
/// Immutable configuration, set once at startup.  Use
/// [`validate`][Self::validate] (called by `CoordinateMapper::new`) before
/// projecting anything.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationAnchors {
    pub top_left:     Anchor,
    pub bottom_right: Anchor,
}

impl CalibrationAnchors {
    /// Anchors for the FLAME University campus SVG.
    pub const FLAME_CAMPUS: CalibrationAnchors = CalibrationAnchors {
        top_left: Anchor {
            pixel: PixelPoint::new(132.75, 133.55),
            geo:   GeoPoint::new(18.5271557, 73.7276252),
        },
        bottom_right: Anchor {
            pixel: PixelPoint::new(2512.5, 3776.5),
            geo:   GeoPoint::new(18.5180856, 73.7339646),
        },
    };

    /// Check the north-west → south-east diagonal and that neither axis is
    /// degenerate.
    pub fn validate(&self) -> MapResult<()> {
        let (tl, br) = (self.top_left, self.bottom_right);

        for anchor in [tl, br] {
            if !anchor.geo.is_valid() {
                return Err(MapError::Configuration(format!(
                    "anchor coordinate {} is out of range",
                    anchor.geo
                )));
            }
            if !(anchor.pixel.x.is_finite() && anchor.pixel.y.is_finite()) {
                return Err(MapError::Configuration(format!(
                    "anchor pixel {} is not finite",
                    anchor.pixel
                )));
            }
        }
        if tl.geo.lat <= br.geo.lat {
            return Err(MapError::Configuration(format!(
                "top-left latitude {} must be north of bottom-right latitude {}",
                tl.geo.lat, br.geo.lat
            )));
        }
        if tl.geo.lng >= br.geo.lng {
            return Err(MapError::Configuration(format!(
                "top-left longitude {} must be west of bottom-right longitude {}",
                tl.geo.lng, br.geo.lng
            )));
        }
        if tl.pixel.x == br.pixel.x || tl.pixel.y == br.pixel.y {
            return Err(MapError::Configuration(format!(
                "anchor pixels {} and {} coincide on an axis",
                tl.pixel, br.pixel
            )));
        }
        Ok(())
    }
}
