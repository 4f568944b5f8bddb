//! `PositionTracker` — owns the sensor watch and turns raw events into
//! quality-classified position updates.
//!
//! # Responsibilities
//!
//! - Start and stop the watch on the injected [`LocationSource`].  Stopping
//!   is idempotent, and dropping the tracker stops it.
//! - Classify every sample with [`GpsQuality`] and report quality changes.
//! - Keep the last known good sample across failures so the UI can keep
//!   showing where the user was.
//! - Mark the signal `Lost` when no usable sample has arrived within the
//!   staleness window.
//!
//! Samples are handed out one at a time via [`PositionTracker::next_events`],
//! so a consumer applies each sample completely before seeing the next.

use std::collections::VecDeque;

use nav_core::{GeoPoint, NavConfig, Timestamp, WatchId};
use tracing::{debug, warn};

use crate::{GpsQuality, LocationSource, PositionSample, SensorError, SensorEvent, SensorResult, WatchOptions};

// ── Events ────────────────────────────────────────────────────────────────────

/// What the tracker tells its consumer after handling one sensor event.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// A usable (`Accurate` or `Degraded`) sample.
    Position(PositionSample),
    QualityChanged { from: GpsQuality, to: GpsQuality },
    Error(SensorError),
}

/// Where a displayed position came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionOrigin {
    /// The most recent sample, and the signal is currently usable.
    Live,
    /// The last good sample, shown while the signal is lost.
    LastKnown,
    /// A configured stand-in used before any real fix.
    Fallback,
}

/// The position a UI should draw, with its provenance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayPosition {
    pub point:       GeoPoint,
    pub accuracy_m:  Option<f64>,
    pub heading_deg: Option<f64>,
    pub origin:      PositionOrigin,
}

// ── PositionTracker ───────────────────────────────────────────────────────────

pub struct PositionTracker<S: LocationSource> {
    source:         S,
    options:        WatchOptions,
    probe_options:  WatchOptions,
    stale_after_ms: u64,

    watch:          Option<WatchId>,
    quality:        GpsQuality,
    last_good:      Option<PositionSample>,
    /// Arrival time of the last usable sample.
    last_usable_at: Option<Timestamp>,
    lost_since:     Option<Timestamp>,
    last_error:     Option<SensorError>,
    fallback:       Option<GeoPoint>,

    /// Events produced outside `next_events` (watch failures), delivered
    /// ahead of anything the source has queued.
    pending:        VecDeque<TrackerEvent>,
}

impl<S: LocationSource> PositionTracker<S> {
    /// Create an idle tracker.  Call [`start`](Self::start) to subscribe.
    pub fn new(source: S, config: &NavConfig) -> Self {
        Self {
            source,
            options:        WatchOptions::live(config),
            probe_options:  WatchOptions::probe(config),
            stale_after_ms: config.stale_after_ms,
            watch:          None,
            quality:        GpsQuality::Lost,
            last_good:      None,
            last_usable_at: None,
            lost_since:     None,
            last_error:     None,
            fallback:       None,
            pending:        VecDeque::new(),
        }
    }

    /// Show `point` as the display position until a real fix arrives.
    pub fn with_fallback(mut self, point: GeoPoint) -> Self {
        self.fallback = Some(point);
        self
    }

    // ── Subscription lifecycle ────────────────────────────────────────────

    /// Subscribe to the source.  No-op if already watching.
    ///
    /// A failure is also queued as a [`TrackerEvent::Error`] so the consumer
    /// sees it on its next drain.
    pub fn start(&mut self, now: Timestamp) -> SensorResult<()> {
        if self.watch.is_some() {
            return Ok(());
        }
        match self.source.watch(&self.options) {
            Ok(id) => {
                debug!(watch = %id, "location watch started");
                self.watch = Some(id);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "location watch could not start");
                let events = self.on_error(err.clone(), now);
                self.pending.extend(events);
                Err(err)
            }
        }
    }

    /// Unsubscribe.  Safe to call any number of times.
    ///
    /// A deliberate stop is not a signal loss: the last good sample stays
    /// on display as last-known, but no loss timer runs, so the consumer is
    /// never told the signal was lost while nothing was listening.
    pub fn stop(&mut self) {
        self.release_watch();
        if self.quality.is_usable() {
            self.quality = GpsQuality::Lost;
        }
        self.lost_since = None;
    }

    fn release_watch(&mut self) {
        if let Some(id) = self.watch.take() {
            self.source.clear_watch(id);
            debug!(watch = %id, "location watch cleared");
        }
    }

    /// Drop the current watch and subscribe again.
    pub fn restart(&mut self, now: Timestamp) -> SensorResult<()> {
        self.release_watch();
        self.start(now)
    }

    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    // ── Event handling ────────────────────────────────────────────────────

    /// Handle the next pending sensor event that has arrived by `now`.
    ///
    /// Returns `None` once nothing is pending.  An event may yield several
    /// tracker events (e.g. a quality change followed by the position).
    pub fn next_events(&mut self, now: Timestamp) -> Option<Vec<TrackerEvent>> {
        if !self.pending.is_empty() {
            return Some(self.pending.drain(..).collect());
        }
        let id = self.watch?;
        let event = self.source.poll(id, now)?;
        Some(self.ingest(event, now))
    }

    /// Apply one sensor event.
    pub fn ingest(&mut self, event: SensorEvent, now: Timestamp) -> Vec<TrackerEvent> {
        match event {
            SensorEvent::Sample(sample) => self.on_sample(sample, now),
            SensorEvent::Error(err) => self.on_error(err, now),
        }
    }

    fn on_sample(&mut self, sample: PositionSample, now: Timestamp) -> Vec<TrackerEvent> {
        if let Err(err) = sample.validate() {
            warn!(error = %err, "dropping sensor sample");
            return Vec::new();
        }
        let mut events = Vec::new();
        let quality = sample.quality();
        self.set_quality(quality, now, &mut events);
        if quality.is_usable() {
            debug!(point = %sample.point, accuracy = sample.accuracy_m, %quality, "position sample");
            self.last_good = Some(sample);
            self.last_usable_at = Some(now);
            self.last_error = None;
            events.push(TrackerEvent::Position(sample));
        } else {
            debug!(accuracy = sample.accuracy_m, "sample too coarse to use");
        }
        events
    }

    fn on_error(&mut self, err: SensorError, now: Timestamp) -> Vec<TrackerEvent> {
        warn!(error = %err, transient = err.is_transient(), "location sensor error");
        let mut events = Vec::new();
        self.set_quality(GpsQuality::Lost, now, &mut events);
        // Permission and capability failures end the watch; only a retry
        // brings it back.
        if !err.is_transient() {
            self.release_watch();
        }
        self.last_error = Some(err.clone());
        events.push(TrackerEvent::Error(err));
        events
    }

    /// Downgrade to `Lost` if the last usable sample is older than the
    /// staleness window.
    pub fn check_staleness(&mut self, now: Timestamp) -> Option<TrackerEvent> {
        if !self.quality.is_usable() {
            return None;
        }
        let last = self.last_usable_at?;
        if now.since(last) <= self.stale_after_ms {
            return None;
        }
        debug!(silent_ms = now.since(last), "no usable sample within staleness window");
        let mut events = Vec::with_capacity(1);
        self.set_quality(GpsQuality::Lost, now, &mut events);
        events.pop()
    }

    fn set_quality(&mut self, to: GpsQuality, now: Timestamp, events: &mut Vec<TrackerEvent>) {
        if to == self.quality {
            return;
        }
        let from = self.quality;
        self.quality = to;
        self.lost_since = (to == GpsQuality::Lost).then_some(now);
        events.push(TrackerEvent::QualityChanged { from, to });
    }

    /// One-shot position request that never accepts a cached sample.
    ///
    /// The outcome is reported through the returned events exactly as if it
    /// had arrived on the watch.
    pub fn probe(&mut self, now: Timestamp) -> Vec<TrackerEvent> {
        match self.source.current_position(&self.probe_options) {
            Ok(sample) => self.on_sample(sample, now),
            Err(err) => self.on_error(err, now),
        }
    }

    /// Startup check of permission and availability via the one-shot
    /// request.
    ///
    /// A fix is queued like a watch sample.  A denial or missing capability
    /// is queued as an error, ends the watch, and is returned.  A transient
    /// failure says nothing about permission and is left to the live watch.
    pub fn probe_availability(&mut self, now: Timestamp) -> SensorResult<()> {
        match self.source.current_position(&self.probe_options) {
            Ok(sample) => {
                let events = self.on_sample(sample, now);
                self.pending.extend(events);
                Ok(())
            }
            Err(err) if err.is_transient() => {
                debug!(error = %err, "startup probe inconclusive");
                Ok(())
            }
            Err(err) => {
                let events = self.on_error(err.clone(), now);
                self.pending.extend(events);
                Err(err)
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn quality(&self) -> GpsQuality {
        self.quality
    }

    /// How long the signal has been `Lost`, if it was ever usable.
    pub fn lost_for(&self, now: Timestamp) -> Option<u64> {
        if self.quality.is_usable() {
            return None;
        }
        self.lost_since.map(|t| now.since(t))
    }

    pub fn last_good(&self) -> Option<&PositionSample> {
        self.last_good.as_ref()
    }

    pub fn last_error(&self) -> Option<&SensorError> {
        self.last_error.as_ref()
    }

    /// The position to draw: the live or last-known sample, or the
    /// fallback when no fix has ever arrived.
    pub fn display_position(&self) -> Option<DisplayPosition> {
        if let Some(s) = &self.last_good {
            let origin = if self.quality.is_usable() {
                PositionOrigin::Live
            } else {
                PositionOrigin::LastKnown
            };
            return Some(DisplayPosition {
                point:       s.point,
                accuracy_m:  Some(s.accuracy_m),
                heading_deg: s.heading_deg,
                origin,
            });
        }
        self.fallback.map(|point| DisplayPosition {
            point,
            accuracy_m:  None,
            heading_deg: None,
            origin:      PositionOrigin::Fallback,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: LocationSource> Drop for PositionTracker<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
