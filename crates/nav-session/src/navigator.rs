//! The `Navigator` driver: owns the tracker, the session and the
//! collaborators, and moves events between them.

use nav_core::{GeoPoint, NavConfig, Timestamp};
use nav_map::{CoordinateMapper, LocationDirectory, MapAsset, MapAssetLoader, PixelPoint};
use nav_tracker::{GpsQuality, LocationSource, PositionTracker, SensorError, TrackerEvent};
use tracing::{info, warn};

use crate::{
    Announcement, Announcer, Instruction, NavObserver, NavigationSession, Phase, SessionError,
    SessionEvent, SessionResult, Snapshot,
};

/// An observer notification waiting for the next pump.
enum Notice {
    Phase(Phase, Phase),
    Instruction(Instruction),
    Announcement(Announcement),
    Quality(GpsQuality, GpsQuality),
    SensorError(SensorError),
}

/// Drives one navigation view.
///
/// The host calls [`pump`](Self::pump) whenever the sensor may have
/// delivered something (or on a steady timer).  Each pump drains pending
/// sensor events in arrival order, applying each sample completely before
/// the next, then evaluates signal loss and the arrival dwell, then reports
/// to the observer.
///
/// The sensor watch runs while a destination is attached and is ended
/// whenever the destination is cleared (cancel, end of the arrival dwell),
/// on [`shutdown`](Self::shutdown), and on drop.  Selecting a destination
/// subscribes again.
///
/// Create via [`NavigatorBuilder`][crate::NavigatorBuilder].
pub struct Navigator<S: LocationSource, A: Announcer> {
    config:        NavConfig,
    mapper:        CoordinateMapper,
    tracker:       PositionTracker<S>,
    session:       NavigationSession,
    announcer:     A,
    directory:     LocationDirectory,
    map_asset:     Option<MapAsset>,
    voice_enabled: bool,
    outbox:        Vec<Notice>,
    /// Latest host time seen; stamps sensor restarts from user actions.
    last_now:      Timestamp,
}

impl<S: LocationSource, A: Announcer> Navigator<S, A> {
    pub(crate) fn from_parts(
        config:    NavConfig,
        mapper:    CoordinateMapper,
        tracker:   PositionTracker<S>,
        announcer: A,
        directory: LocationDirectory,
        map_asset: Option<MapAsset>,
        now:       Timestamp,
    ) -> Self {
        Self {
            session: NavigationSession::new(&config),
            voice_enabled: config.voice_enabled,
            config,
            mapper,
            tracker,
            announcer,
            directory,
            map_asset,
            outbox: Vec::new(),
            last_now: now,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Process everything that has happened up to `now`.
    pub fn pump<O: NavObserver>(&mut self, now: Timestamp, observer: &mut O) {
        self.touch(now);
        while let Some(events) = self.tracker.next_events(now) {
            for event in events {
                self.handle_tracker_event(event, now);
            }
        }

        if let Some(event) = self.tracker.check_staleness(now) {
            self.handle_tracker_event(event, now);
        }
        if self.tracker.lost_for(now).is_some_and(|ms| ms >= self.config.lost_grace_ms) {
            let events = self.session.sensor_lost();
            self.handle_session_events(events);
        }

        let guiding = self.session.destination().is_some();
        let events = self.session.tick(now);
        self.handle_session_events(events);
        if guiding && self.session.destination().is_none() {
            self.end_watch();
        }

        self.flush(observer);
        observer.on_snapshot(&self.snapshot(now));
    }

    fn handle_tracker_event(&mut self, event: TrackerEvent, now: Timestamp) {
        match event {
            TrackerEvent::Position(sample) => {
                let events = self.session.apply_position(sample, now);
                self.handle_session_events(events);
            }
            TrackerEvent::QualityChanged { from, to } => {
                info!(%from, %to, "GPS quality changed");
                self.outbox.push(Notice::Quality(from, to));
            }
            TrackerEvent::Error(err) => self.outbox.push(Notice::SensorError(err)),
        }
    }

    fn handle_session_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::PhaseChanged { from, to } => self.outbox.push(Notice::Phase(from, to)),
                SessionEvent::Instruction(i) => self.outbox.push(Notice::Instruction(i)),
                SessionEvent::Announcement(a) => {
                    self.speak(&a);
                    self.outbox.push(Notice::Announcement(a));
                }
            }
        }
    }

    fn speak(&mut self, announcement: &Announcement) {
        if self.voice_enabled {
            self.announcer.announce(&announcement.text());
        }
    }

    fn flush<O: NavObserver>(&mut self, observer: &mut O) {
        for notice in self.outbox.drain(..) {
            match notice {
                Notice::Phase(from, to)      => observer.on_phase_change(from, to),
                Notice::Instruction(i)       => observer.on_instruction(&i),
                Notice::Announcement(a)      => observer.on_announcement(&a),
                Notice::Quality(from, to)    => observer.on_quality_change(from, to),
                Notice::SensorError(err)     => observer.on_sensor_error(&err),
            }
        }
    }

    // ── User actions ──────────────────────────────────────────────────────

    /// Choose a destination by coordinate.
    ///
    /// # Errors
    ///
    /// [`SessionError::Map`] wrapping `OutOfBoundsSelection` if the point is
    /// outside the calibrated area (the session is untouched), or
    /// [`SessionError::NavigationInProgress`] while navigating.
    pub fn select_destination(&mut self, point: GeoPoint, name: &str) -> SessionResult<()> {
        let point = self.mapper.check_selection(point)?;
        self.attach(point, name)
    }

    /// Choose a destination by tapping the map image.
    pub fn select_pixel(&mut self, pixel: PixelPoint, name: &str) -> SessionResult<()> {
        let point = self.mapper.select_pixel(pixel)?;
        self.attach(point, name)
    }

    /// Choose a destination from the campus directory by exact name.
    pub fn select_named(&mut self, name: &str) -> SessionResult<()> {
        let location = self
            .directory
            .find(name)
            .ok_or_else(|| SessionError::UnknownLocation(name.to_owned()))?;
        let (point, name) = (location.point, location.name.clone());
        self.select_destination(point, &name)
    }

    pub fn start_navigation(&mut self, now: Timestamp) -> SessionResult<()> {
        self.touch(now);
        let events = self.session.start_navigation(now)?;
        self.handle_session_events(events);
        Ok(())
    }

    /// Drop the destination and end the sensor watch.
    pub fn cancel(&mut self) {
        let events = self.session.cancel();
        self.handle_session_events(events);
        self.end_watch();
    }

    /// Hand a bounds-checked destination to the session and make sure the
    /// sensor is listening.  A watch that will not start is reported on the
    /// next pump; the selection itself stands.
    fn attach(&mut self, point: GeoPoint, name: &str) -> SessionResult<()> {
        let events = self.session.select_destination(point, name)?;
        self.handle_session_events(events);
        if !self.tracker.is_watching() {
            if let Err(err) = self.tracker.start(self.last_now) {
                warn!(error = %err, route = ?err.setup_route(), "sensor did not resume for new destination");
            }
        }
        Ok(())
    }

    fn end_watch(&mut self) {
        if self.tracker.is_watching() {
            info!("destination cleared, stopping location watch");
        }
        self.tracker.stop();
    }

    fn touch(&mut self, now: Timestamp) {
        self.last_now = self.last_now.max(now);
    }

    /// The retry affordance: re-subscribe and ask for a fresh fix.
    ///
    /// A failure to re-subscribe is returned and also reaches the observer
    /// on the next pump.  The probe's outcome is applied like any sample.
    pub fn retry(&mut self, now: Timestamp) -> SessionResult<()> {
        info!("retrying location");
        self.touch(now);
        self.tracker.restart(now)?;
        for event in self.tracker.probe(now) {
            self.handle_tracker_event(event, now);
        }
        Ok(())
    }

    /// Turn speech output on or off.  Announcement state keeps advancing
    /// while muted so re-enabling never replays old thresholds.
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        if enabled == self.voice_enabled {
            return;
        }
        self.voice_enabled = enabled;
        if enabled {
            let announcement = Announcement::VoiceEnabled;
            self.speak(&announcement);
            self.outbox.push(Notice::Announcement(announcement));
        }
    }

    /// Fetch the map image.  Failure leaves navigation untouched and may be
    /// retried.
    pub fn load_map<L: MapAssetLoader>(&mut self, loader: &mut L, url: &str) -> SessionResult<()> {
        match loader.fetch(url) {
            Ok(asset) => {
                info!(url, width = ?asset.width, height = ?asset.height, "map asset loaded");
                self.map_asset = Some(asset);
                Ok(())
            }
            Err(err) => {
                warn!(url, error = %err, "map asset failed to load");
                Err(err.into())
            }
        }
    }

    /// Stop the sensor watch.  Idempotent; also happens on drop.
    pub fn shutdown(&mut self) {
        self.tracker.stop();
    }

    // ── Read-only state ───────────────────────────────────────────────────

    /// Pixel position for `geo`, or `None` if it is off the calibrated area
    /// or outside the loaded image.
    pub fn project(&self, geo: GeoPoint) -> Option<PixelPoint> {
        self.mapper
            .project(geo)
            .filter(|px| self.map_asset.as_ref().is_none_or(|asset| asset.contains_pixel(*px)))
    }

    pub fn snapshot(&self, now: Timestamp) -> Snapshot {
        let quality = self.tracker.quality();
        let position = self.tracker.display_position();
        let destination = self.session.destination().cloned();
        let distance_m = self.session.distance_remaining();
        Snapshot {
            at:             now,
            phase:          self.session.phase(),
            position_px:    position.and_then(|p| self.project(p.point)),
            destination_px: destination.as_ref().and_then(|d| self.project(d.point)),
            destination,
            position,
            distance_m,
            eta_seconds:    self.session.eta_seconds(),
            bearing_deg:    self.session.bearing_deg(),
            instruction:    self.session.instruction().cloned(),
            quality,
            stale:          distance_m.is_some() && !quality.is_usable(),
            sensor_error:   self.tracker.last_error().cloned(),
            last_announced_threshold: self.session.last_announced_threshold(),
            voice_enabled:  self.voice_enabled,
            map_loaded:     self.map_asset.is_some(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn tracker(&self) -> &PositionTracker<S> {
        &self.tracker
    }

    /// The sensor collaborator, e.g. to feed a replay source.
    pub fn source_mut(&mut self) -> &mut S {
        self.tracker.source_mut()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }
}
