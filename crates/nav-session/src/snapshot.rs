//! Read-only view of navigation state for rendering.

use nav_core::{Timestamp, format_distance, format_duration};
use nav_map::PixelPoint;
use nav_tracker::{DisplayPosition, GpsQuality, SensorError};

use crate::session::progress_fraction;
use crate::{Destination, Instruction, Phase};

/// Everything a UI needs to draw one frame.
///
/// Pixel fields are `None` when the point lies outside the calibrated map
/// area or the loaded image; the geographic values are still valid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub at:             Timestamp,
    pub phase:          Phase,
    pub destination:    Option<Destination>,
    pub position:       Option<DisplayPosition>,
    pub position_px:    Option<PixelPoint>,
    pub destination_px: Option<PixelPoint>,
    pub distance_m:     Option<f64>,
    pub eta_seconds:    Option<f64>,
    pub bearing_deg:    Option<f64>,
    pub instruction:    Option<Instruction>,
    pub quality:        GpsQuality,
    /// Distance and ETA were computed from a position that is no longer
    /// live.  The UI must flag them rather than show them as current.
    pub stale:          bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub sensor_error:   Option<SensorError>,
    pub last_announced_threshold: Option<u32>,
    pub voice_enabled:  bool,
    pub map_loaded:     bool,
}

impl Snapshot {
    /// Share of the selection-time distance already walked, `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        let total = self.destination.as_ref()?.total_distance_at_selection?;
        Some(progress_fraction(total, self.distance_m?))
    }

    pub fn distance_text(&self) -> String {
        self.distance_m.map_or_else(|| "--".to_owned(), format_distance)
    }

    pub fn eta_text(&self) -> String {
        self.eta_seconds.map_or_else(|| "--".to_owned(), format_duration)
    }
}
