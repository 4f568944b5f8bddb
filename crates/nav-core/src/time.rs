//! Time model and navigation configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing millisecond counter, `Timestamp`,
//! supplied by the host (sensor samples carry their own; driver calls take
//! `now`).  The core never reads a wall clock, so every transition that
//! depends on elapsed time (staleness, arrival dwell) is reproducible in
//! tests by passing explicit timestamps.

use std::fmt;

use crate::{NavError, NavResult};
use crate::geo::AVERAGE_WALKING_SPEED_MPS;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// Milliseconds on the host's monotonic clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Return the timestamp `ms` milliseconds after `self`, saturating at
    /// the end of the clock.
    #[inline]
    pub fn offset(self, ms: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero so a
    /// sample stamped slightly ahead of `now` never underflows.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Tunables for tracking and guidance.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and passed to the navigator builder.  `Default` carries
/// the stock campus values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// ETA divisor, metres per second.  Default: 1.39 (5 km/h).
    pub walking_speed_mps: f64,

    /// Remaining distance at or below which the user has arrived.
    pub arrival_radius_m: f64,

    /// How long the `Arrived` display state lasts before auto-return.
    pub arrival_dwell_ms: u64,

    /// No sample within this window means GPS quality is `Lost`.
    pub stale_after_ms: u64,

    /// Quality must stay `Lost` this long before guidance is paused.
    pub lost_grace_ms: u64,

    /// Sensor timeout for the live watch and the one-shot probe.
    pub watch_timeout_ms: u64,

    /// Oldest cached sample the sensor may return for the live watch.
    pub max_sample_age_ms: u64,

    /// Ask the sensor for its high-accuracy mode.
    pub high_accuracy: bool,

    /// Forward announcements to the speech collaborator.
    pub voice_enabled: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            walking_speed_mps: AVERAGE_WALKING_SPEED_MPS,
            arrival_radius_m:  10.0,
            arrival_dwell_ms:  5_000,
            stale_after_ms:    10_000,
            lost_grace_ms:     5_000,
            watch_timeout_ms:  10_000,
            max_sample_age_ms: 5_000,
            high_accuracy:     true,
            voice_enabled:     true,
        }
    }
}

impl NavConfig {
    /// Reject values that would make ETA or arrival detection meaningless.
    pub fn validate(&self) -> NavResult<()> {
        if !(self.walking_speed_mps.is_finite() && self.walking_speed_mps > 0.0) {
            return Err(NavError::Config(format!(
                "walking_speed_mps must be positive, got {}",
                self.walking_speed_mps
            )));
        }
        if !(self.arrival_radius_m.is_finite() && self.arrival_radius_m > 0.0) {
            return Err(NavError::Config(format!(
                "arrival_radius_m must be positive, got {}",
                self.arrival_radius_m
            )));
        }
        if self.stale_after_ms == 0 || self.watch_timeout_ms == 0 {
            return Err(NavError::Config(
                "stale_after_ms and watch_timeout_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
