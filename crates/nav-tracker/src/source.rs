//! The live-location collaborator.
//!
//! A [`LocationSource`] hands out watch subscriptions and queues sensor
//! events for them.  The tracker pulls events with [`LocationSource::poll`]
//! on the host's single cooperative thread, so samples are handled strictly
//! in arrival order and one at a time.

use std::collections::VecDeque;

use nav_core::{NavConfig, Timestamp, WatchId};

use crate::{PositionSample, SensorError, SensorResult};

/// Options passed to the sensor when subscribing or probing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy:     bool,
    pub timeout_ms:        u64,
    pub max_sample_age_ms: u64,
}

impl WatchOptions {
    /// Options for the long-lived watch.
    pub fn live(config: &NavConfig) -> Self {
        Self {
            high_accuracy:     config.high_accuracy,
            timeout_ms:        config.watch_timeout_ms,
            max_sample_age_ms: config.max_sample_age_ms,
        }
    }

    /// Options for the one-shot probe: never accept a cached sample.
    pub fn probe(config: &NavConfig) -> Self {
        Self { max_sample_age_ms: 0, ..Self::live(config) }
    }
}

/// One event delivered on a watch.
#[derive(Clone, Debug, PartialEq)]
pub enum SensorEvent {
    Sample(PositionSample),
    Error(SensorError),
}

/// A source of live positions (browser geolocation, a GNSS receiver, a
/// replay file, a simulation).
pub trait LocationSource {
    /// Start a watch.  Fails immediately if the capability is missing or
    /// permission was refused up front.
    fn watch(&mut self, options: &WatchOptions) -> SensorResult<WatchId>;

    /// Stop a watch.  Unknown or already-cleared ids are ignored.
    fn clear_watch(&mut self, id: WatchId);

    /// Next event that has arrived on watch `id` by `now`, or `None` if
    /// nothing is pending.
    fn poll(&mut self, id: WatchId, now: Timestamp) -> Option<SensorEvent>;

    /// One-shot position request bounded by `options.timeout_ms`.
    fn current_position(&mut self, options: &WatchOptions) -> SensorResult<PositionSample>;
}

impl<S: LocationSource + ?Sized> LocationSource for &mut S {
    fn watch(&mut self, options: &WatchOptions) -> SensorResult<WatchId> {
        (**self).watch(options)
    }

    fn clear_watch(&mut self, id: WatchId) {
        (**self).clear_watch(id)
    }

    fn poll(&mut self, id: WatchId, now: Timestamp) -> Option<SensorEvent> {
        (**self).poll(id, now)
    }

    fn current_position(&mut self, options: &WatchOptions) -> SensorResult<PositionSample> {
        (**self).current_position(options)
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// A [`LocationSource`] that replays a scripted event queue.
///
/// Events are delivered only while a watch is active; clearing the watch
/// leaves undelivered events queued.  Subscription calls are counted so
/// callers can assert that nothing leaks.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    events:        VecDeque<SensorEvent>,
    probes:        VecDeque<SensorResult<PositionSample>>,
    watch_failure: Option<SensorError>,
    active:        Option<WatchId>,
    next_id:       WatchId,
    /// Number of successful `watch` calls.
    pub watches:   usize,
    /// Number of `clear_watch` calls that stopped an active watch.
    pub clears:    usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source that will replay `samples` in order.
    pub fn with_samples(samples: impl IntoIterator<Item = PositionSample>) -> Self {
        let mut source = Self::new();
        source.events.extend(samples.into_iter().map(SensorEvent::Sample));
        source
    }

    pub fn push_sample(&mut self, sample: PositionSample) {
        self.events.push_back(SensorEvent::Sample(sample));
    }

    pub fn push_error(&mut self, error: SensorError) {
        self.events.push_back(SensorEvent::Error(error));
    }

    /// Make every subsequent `watch` call fail with `error` (`None` restores).
    pub fn fail_watch_with(&mut self, error: Option<SensorError>) {
        self.watch_failure = error;
    }

    /// Queue the result of the next `current_position` call.
    pub fn push_probe(&mut self, result: SensorResult<PositionSample>) {
        self.probes.push_back(result);
    }

    pub fn is_watching(&self) -> bool {
        self.active.is_some()
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl LocationSource for ScriptedSource {
    fn watch(&mut self, _options: &WatchOptions) -> SensorResult<WatchId> {
        if let Some(err) = &self.watch_failure {
            return Err(err.clone());
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.active = Some(id);
        self.watches += 1;
        Ok(id)
    }

    fn clear_watch(&mut self, id: WatchId) {
        if self.active == Some(id) {
            self.active = None;
            self.clears += 1;
        }
    }

    fn poll(&mut self, id: WatchId, _now: Timestamp) -> Option<SensorEvent> {
        if self.active != Some(id) {
            return None;
        }
        self.events.pop_front()
    }

    fn current_position(&mut self, _options: &WatchOptions) -> SensorResult<PositionSample> {
        self.probes.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}
