//! Observer trait for UI updates and event collection.

use nav_tracker::{GpsQuality, SensorError};

use crate::{Announcement, Instruction, Phase, Snapshot};

/// Callbacks invoked by [`Navigator::pump`][crate::Navigator::pump].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Events raised by user actions
/// (`select_destination`, `start_navigation`, …) are delivered on the next
/// pump, ahead of any new sensor input.
///
/// # Example: status line
///
/// ```rust,ignore
/// struct StatusLine;
///
/// impl NavObserver for StatusLine {
///     fn on_snapshot(&mut self, snap: &Snapshot) {
///         println!("{} {}", snap.phase, snap.distance_text());
///     }
/// }
/// ```
pub trait NavObserver {
    fn on_phase_change(&mut self, _from: Phase, _to: Phase) {}

    /// The current instruction text changed.
    fn on_instruction(&mut self, _instruction: &Instruction) {}

    /// Called for every announcement, whether or not voice output is on.
    fn on_announcement(&mut self, _announcement: &Announcement) {}

    fn on_quality_change(&mut self, _from: GpsQuality, _to: GpsQuality) {}

    /// A sensor failure.  Use [`SensorError::setup_route`] to decide between
    /// the location-setup view and the signal-lost view.
    fn on_sensor_error(&mut self, _error: &SensorError) {}

    /// Called once at the end of every pump with the read-only state.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}

/// Records everything it is told, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub phases:        Vec<(Phase, Phase)>,
    pub instructions:  Vec<Instruction>,
    pub announcements: Vec<Announcement>,
    pub qualities:     Vec<(GpsQuality, GpsQuality)>,
    pub errors:        Vec<SensorError>,
    pub last_snapshot: Option<Snapshot>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrival announcements seen so far.
    pub fn arrivals(&self) -> usize {
        self.announcements.iter().filter(|a| **a == Announcement::Arrived).count()
    }
}

impl NavObserver for RecordingObserver {
    fn on_phase_change(&mut self, from: Phase, to: Phase) {
        self.phases.push((from, to));
    }

    fn on_instruction(&mut self, instruction: &Instruction) {
        self.instructions.push(instruction.clone());
    }

    fn on_announcement(&mut self, announcement: &Announcement) {
        self.announcements.push(announcement.clone());
    }

    fn on_quality_change(&mut self, from: GpsQuality, to: GpsQuality) {
        self.qualities.push((from, to));
    }

    fn on_sensor_error(&mut self, error: &SensorError) {
        self.errors.push(error.clone());
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.last_snapshot = Some(snapshot.clone());
    }
}
