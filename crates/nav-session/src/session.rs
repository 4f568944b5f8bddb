//! `NavigationSession` — the guidance state machine.
//!
//! # Phases
//!
//! ```text
//! Idle       --select, no fix-->          Searching
//! Idle       --fix-->                     Tracking
//! Searching  --fix, start requested-->    Navigating
//! Searching  --fix-->                     Tracking    (destination attached)
//! Tracking   --select-->                  Tracking    (destination attached)
//! Tracking   --start-->                   Navigating
//! Navigating --distance <= radius-->      Arrived
//! Arrived    --dwell elapsed-->           Idle
//! any        --cancel-->                  Idle
//! any        --signal lost-->             Searching, or Idle without a destination
//! ```
//!
//! Clearing the destination (cancel, or the end of the arrival dwell) ends
//! the sensor subscription, so the session also stops treating its last
//! position as usable.  The next selection starts over from `Searching`.
//!
//! Every mutation returns the [`SessionEvent`]s it produced, in order.  The
//! session never reads a clock or talks to a collaborator; the driver feeds
//! it samples and timestamps and forwards its events.

use std::fmt;

use nav_core::{GeoPoint, NavConfig, Timestamp, walking_seconds};
use nav_tracker::PositionSample;
use tracing::{debug, info};

use crate::{Announcement, AnnouncementPolicy, Instruction, SessionError, SessionResult, instruction_for};

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No destination and no usable position.
    #[default]
    Idle,
    /// A destination is set but there is no usable position yet.
    Searching,
    /// Position known; a destination may be attached but guidance has not
    /// been started.
    Tracking,
    /// Actively guiding towards the destination.
    Navigating,
    /// Display state after reaching the destination.
    Arrived,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle       => "idle",
            Phase::Searching  => "searching",
            Phase::Tracking   => "tracking",
            Phase::Navigating => "navigating",
            Phase::Arrived    => "arrived",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Destination ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    pub point: GeoPoint,
    pub name:  String,
    /// Distance from the user when the destination was chosen, or from the
    /// first fix after that.  Basis for progress.
    pub total_distance_at_selection: Option<f64>,
}

/// Something the session wants its consumers to know about.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    PhaseChanged { from: Phase, to: Phase },
    /// The current instruction changed.
    Instruction(Instruction),
    Announcement(Announcement),
}

// ── NavigationSession ─────────────────────────────────────────────────────────

pub struct NavigationSession {
    walking_speed_mps:    f64,
    arrival_radius_m:     f64,
    arrival_dwell_ms:     u64,

    phase:                Phase,
    destination:          Option<Destination>,
    last_position:        Option<PositionSample>,
    /// `false` while the tracker reports the signal lost.
    position_usable:      bool,
    distance_remaining:   Option<f64>,
    eta_seconds:          Option<f64>,
    bearing_deg:          Option<f64>,
    instruction:          Option<Instruction>,
    policy:               AnnouncementPolicy,
    navigation_requested: bool,
    /// Set once "navigation started" has been announced for this start.
    start_announced:      bool,
    arrived_at:           Option<Timestamp>,
}

impl NavigationSession {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            walking_speed_mps:    config.walking_speed_mps,
            arrival_radius_m:     config.arrival_radius_m,
            arrival_dwell_ms:     config.arrival_dwell_ms,
            phase:                Phase::Idle,
            destination:          None,
            last_position:        None,
            position_usable:      false,
            distance_remaining:   None,
            eta_seconds:          None,
            bearing_deg:          None,
            instruction:          None,
            policy:               AnnouncementPolicy::new(config.arrival_radius_m),
            navigation_requested: false,
            start_announced:      false,
            arrived_at:           None,
        }
    }

    // ── User actions ──────────────────────────────────────────────────────

    /// Attach a destination.  Does not start guidance.
    ///
    /// The point must already be bounds-checked by the caller.  Fails while
    /// navigating; cancel first.
    pub fn select_destination(
        &mut self,
        point: GeoPoint,
        name:  impl Into<String>,
    ) -> SessionResult<Vec<SessionEvent>> {
        if self.phase == Phase::Navigating {
            return Err(SessionError::NavigationInProgress);
        }
        let name = name.into();
        info!(%point, name = %name, "destination selected");

        let total = self.usable_position().map(|p| p.point.distance_m(point));
        self.destination = Some(Destination { point, name, total_distance_at_selection: total });
        self.policy.reset();
        self.navigation_requested = false;
        self.start_announced = false;
        self.arrived_at = None;

        let mut events = Vec::new();
        let next = if self.usable_position().is_some() { Phase::Tracking } else { Phase::Searching };
        self.set_phase(next, &mut events);
        self.recompute(&mut events);
        Ok(events)
    }

    /// Begin guidance.  With a usable fix this enters `Navigating` at once;
    /// otherwise the session waits in `Searching` for the first fix.
    pub fn start_navigation(&mut self, now: Timestamp) -> SessionResult<Vec<SessionEvent>> {
        if self.destination.is_none() {
            return Err(SessionError::NoDestination);
        }
        let mut events = Vec::new();
        if matches!(self.phase, Phase::Navigating | Phase::Arrived) {
            return Ok(events);
        }
        self.navigation_requested = true;
        if self.usable_position().is_some() {
            self.enter_navigating(&mut events);
            self.recompute(&mut events);
            self.guide(now, &mut events);
        } else {
            self.set_phase(Phase::Searching, &mut events);
        }
        Ok(events)
    }

    /// Drop the destination and all guidance state.
    pub fn cancel(&mut self) -> Vec<SessionEvent> {
        if self.destination.is_some() {
            info!("navigation cancelled");
        }
        let mut events = Vec::new();
        self.teardown(&mut events);
        events
    }

    // ── Tracker input ─────────────────────────────────────────────────────

    /// Apply one usable sample.  Steps run in a fixed order and the whole
    /// update completes before this returns:
    ///
    /// 1. store the position
    /// 2. remaining distance to the destination
    /// 3. ETA at walking speed
    /// 4. instruction
    /// 5. announcements (only while navigating)
    pub fn apply_position(&mut self, sample: PositionSample, now: Timestamp) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.last_position = Some(sample);
        self.position_usable = true;

        match self.phase {
            // Guidance is over; keep the position for display only.
            Phase::Arrived => return events,
            Phase::Idle => self.set_phase(Phase::Tracking, &mut events),
            Phase::Searching if self.navigation_requested => self.enter_navigating(&mut events),
            Phase::Searching => self.set_phase(Phase::Tracking, &mut events),
            Phase::Tracking | Phase::Navigating => {}
        }

        self.recompute(&mut events);
        self.guide(now, &mut events);
        events
    }

    /// The tracker has reported the signal lost for longer than the grace
    /// window.  Guidance pauses; the destination is kept.
    pub fn sensor_lost(&mut self) -> Vec<SessionEvent> {
        self.position_usable = false;
        let mut events = Vec::new();
        if self.phase == Phase::Arrived {
            return events;
        }
        let next = if self.destination.is_some() { Phase::Searching } else { Phase::Idle };
        self.set_phase(next, &mut events);
        events
    }

    /// Time-driven transitions: the arrival dwell.
    pub fn tick(&mut self, now: Timestamp) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let Some(arrived_at) = self.arrived_at else {
            return events;
        };
        if self.phase != Phase::Arrived || now.since(arrived_at) < self.arrival_dwell_ms {
            return events;
        }
        self.teardown(&mut events);
        events
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn usable_position(&self) -> Option<&PositionSample> {
        self.last_position.as_ref().filter(|_| self.position_usable)
    }

    fn set_phase(&mut self, to: Phase, events: &mut Vec<SessionEvent>) {
        if self.phase == to {
            return;
        }
        let from = self.phase;
        self.phase = to;
        info!(%from, %to, "session phase changed");
        events.push(SessionEvent::PhaseChanged { from, to });
    }

    fn enter_navigating(&mut self, events: &mut Vec<SessionEvent>) {
        self.set_phase(Phase::Navigating, events);
        if self.start_announced {
            return;
        }
        self.start_announced = true;
        if let Some(dest) = &self.destination {
            events.push(SessionEvent::Announcement(Announcement::NavigationStarted {
                destination: dest.name.clone(),
            }));
        }
    }

    /// Steps 2–4: distance, ETA, bearing and instruction from the current
    /// position.  A pure function of state, so repeating a sample is harmless.
    fn recompute(&mut self, events: &mut Vec<SessionEvent>) {
        let (Some(pos), Some(dest)) = (self.last_position.as_ref(), self.destination.as_mut()) else {
            return;
        };
        let distance = pos.point.distance_m(dest.point);
        let bearing = pos.point.bearing_deg(dest.point);
        dest.total_distance_at_selection.get_or_insert(distance);

        self.distance_remaining = Some(distance);
        self.eta_seconds = Some(walking_seconds(distance, self.walking_speed_mps));
        self.bearing_deg = Some(bearing);
        debug!(distance_m = distance, bearing_deg = bearing, "guidance recomputed");

        let instruction = instruction_for(distance, bearing, pos.heading_deg, &dest.name);
        if self.instruction.as_ref().is_none_or(|i| i.text != instruction.text) {
            events.push(SessionEvent::Instruction(instruction.clone()));
        }
        self.instruction = Some(instruction);
    }

    /// Step 5 plus the arrival transition.
    fn guide(&mut self, now: Timestamp, events: &mut Vec<SessionEvent>) {
        if self.phase != Phase::Navigating {
            return;
        }
        let Some(distance) = self.distance_remaining else {
            return;
        };
        if distance <= self.arrival_radius_m {
            self.set_phase(Phase::Arrived, events);
            self.arrived_at = Some(now);
        }
        if let Some(announcement) = self.policy.evaluate(distance) {
            info!(%announcement, distance_m = distance, "announcement");
            events.push(SessionEvent::Announcement(announcement));
        }
    }

    fn teardown(&mut self, events: &mut Vec<SessionEvent>) {
        self.destination = None;
        self.distance_remaining = None;
        self.eta_seconds = None;
        self.bearing_deg = None;
        self.instruction = None;
        self.policy.reset();
        self.navigation_requested = false;
        self.start_announced = false;
        self.arrived_at = None;
        self.position_usable = false;
        self.set_phase(Phase::Idle, events);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn last_position(&self) -> Option<&PositionSample> {
        self.last_position.as_ref()
    }

    pub fn distance_remaining(&self) -> Option<f64> {
        self.distance_remaining
    }

    pub fn eta_seconds(&self) -> Option<f64> {
        self.eta_seconds
    }

    pub fn bearing_deg(&self) -> Option<f64> {
        self.bearing_deg
    }

    pub fn instruction(&self) -> Option<&Instruction> {
        self.instruction.as_ref()
    }

    pub fn last_announced_threshold(&self) -> Option<u32> {
        self.policy.last_announced_threshold()
    }

    pub fn navigation_requested(&self) -> bool {
        self.navigation_requested
    }

    /// Fraction of the selection-time distance already covered, `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        let total = self.destination.as_ref()?.total_distance_at_selection?;
        let remaining = self.distance_remaining?;
        Some(progress_fraction(total, remaining))
    }
}

pub(crate) fn progress_fraction(total: f64, remaining: f64) -> f64 {
    if total <= 0.0 {
        return 1.0;
    }
    ((total - remaining) / total).clamp(0.0, 1.0)
}
