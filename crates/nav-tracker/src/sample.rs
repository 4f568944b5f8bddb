//! Position samples and GPS quality classification.

use std::fmt;

use nav_core::{GeoPoint, Timestamp};

use crate::{SensorError, SensorResult};

/// Three-level signal classification derived from reported accuracy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GpsQuality {
    /// `accuracy ≤ 10 m`.
    Accurate,
    /// `10 m < accuracy ≤ 50 m`.
    Degraded,
    /// Worse than 50 m, a sensor failure, or no recent sample.
    Lost,
}

impl GpsQuality {
    pub const ACCURATE_MAX_M: f64 = 10.0;
    pub const DEGRADED_MAX_M: f64 = 50.0;

    /// Classify a horizontal accuracy in metres.  NaN classifies as `Lost`.
    pub fn classify(accuracy_m: f64) -> GpsQuality {
        if accuracy_m <= Self::ACCURATE_MAX_M {
            GpsQuality::Accurate
        } else if accuracy_m <= Self::DEGRADED_MAX_M {
            GpsQuality::Degraded
        } else {
            GpsQuality::Lost
        }
    }

    /// `true` if a sample of this quality may drive guidance.
    #[inline]
    pub fn is_usable(self) -> bool {
        !matches!(self, GpsQuality::Lost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GpsQuality::Accurate => "accurate",
            GpsQuality::Degraded => "degraded",
            GpsQuality::Lost     => "lost",
        }
    }
}

impl fmt::Display for GpsQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading from the location sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionSample {
    pub point:       GeoPoint,
    /// Horizontal accuracy radius in metres, `≥ 0`.
    pub accuracy_m:  f64,
    /// Direction of travel in degrees `[0, 360)`; `None` when the sensor
    /// cannot tell (e.g. stationary).
    pub heading_deg: Option<f64>,
    pub timestamp:   Timestamp,
}

impl PositionSample {
    pub fn new(point: GeoPoint, accuracy_m: f64, timestamp: Timestamp) -> Self {
        Self { point, accuracy_m, heading_deg: None, timestamp }
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }

    #[inline]
    pub fn quality(&self) -> GpsQuality {
        GpsQuality::classify(self.accuracy_m)
    }

    /// Reject coordinates, accuracies or headings outside their ranges.
    pub fn validate(&self) -> SensorResult<()> {
        if !self.point.is_valid() {
            return Err(SensorError::InvalidSample(format!("coordinate {} out of range", self.point)));
        }
        if !(self.accuracy_m.is_finite() && self.accuracy_m >= 0.0) {
            return Err(SensorError::InvalidSample(format!("accuracy {} is not a distance", self.accuracy_m)));
        }
        if let Some(h) = self.heading_deg {
            if !(h.is_finite() && (0.0..=360.0).contains(&h)) {
                return Err(SensorError::InvalidSample(format!("heading {h} out of range")));
            }
        }
        Ok(())
    }
}
