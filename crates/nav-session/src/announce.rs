//! One-shot spoken announcements and the policy that decides when they fire.

use std::fmt;

/// Remaining-distance thresholds, descending, in metres.
pub const THRESHOLDS_M: [u32; 5] = [500, 200, 100, 50, 25];

/// A message for the speech collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Announcement {
    NavigationStarted { destination: String },
    Threshold { meters: u32 },
    Arrived,
    VoiceEnabled,
}

impl Announcement {
    pub fn text(&self) -> String {
        match self {
            Announcement::NavigationStarted { destination } if destination.trim().is_empty() => {
                "Navigation started to your destination".to_owned()
            }
            Announcement::NavigationStarted { destination } => {
                format!("Navigation started to {destination}")
            }
            Announcement::Threshold { meters: 25 } => "You are almost at your destination".to_owned(),
            Announcement::Threshold { meters } => {
                format!("In {meters} meters, you will reach your destination")
            }
            Announcement::Arrived => "You have arrived at your destination".to_owned(),
            Announcement::VoiceEnabled => "Voice guidance enabled".to_owned(),
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

// ── AnnouncementPolicy ────────────────────────────────────────────────────────

/// Tracks which threshold was last announced for the current destination.
///
/// Scanning [`THRESHOLDS_M`] from largest to smallest, the first threshold
/// `t` with `distance ≤ t` that is below the last announced one fires.  At
/// most one announcement fires per evaluation, so re-evaluating the same
/// distance never repeats a threshold.  Arrival fires once and silences the
/// policy until [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct AnnouncementPolicy {
    arrival_radius_m: f64,
    last_threshold:   Option<u32>,
    arrived:          bool,
}

impl AnnouncementPolicy {
    pub fn new(arrival_radius_m: f64) -> Self {
        Self { arrival_radius_m, last_threshold: None, arrived: false }
    }

    /// Announcement due at `distance_m`, if any.  Updates policy state.
    pub fn evaluate(&mut self, distance_m: f64) -> Option<Announcement> {
        if self.arrived || !distance_m.is_finite() {
            return None;
        }
        if distance_m <= self.arrival_radius_m {
            self.arrived = true;
            return Some(Announcement::Arrived);
        }
        let t = THRESHOLDS_M.iter().copied().find(|&t| {
            distance_m <= f64::from(t) && self.last_threshold.is_none_or(|last| last > t)
        })?;
        self.last_threshold = Some(t);
        Some(Announcement::Threshold { meters: t })
    }

    pub fn last_announced_threshold(&self) -> Option<u32> {
        self.last_threshold
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    /// Forget all announcements; called whenever the destination changes.
    pub fn reset(&mut self) {
        self.last_threshold = None;
        self.arrived = false;
    }
}

// ── Speech collaborator ───────────────────────────────────────────────────────

/// Fire-and-forget speech output.  A new announcement interrupts any
/// in-flight one; there is no queue.
pub trait Announcer {
    fn announce(&mut self, text: &str);
}

impl<A: Announcer + ?Sized> Announcer for &mut A {
    fn announce(&mut self, text: &str) {
        (**self).announce(text)
    }
}

/// Discards everything.  For hosts without speech output.
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _text: &str) {}
}

/// Keeps every announcement in order.  Used by tests and the demo's log.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    pub spoken: Vec<String>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, text: &str) {
        self.spoken.push(text.to_owned());
    }
}
