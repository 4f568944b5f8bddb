//! `SimulatedWalk` — a seeded source that walks a straight line.
//!
//! Used by the demo app and by end-to-end tests.  Samples are emitted every
//! `interval_ms` on the host clock, starting at the first poll, and a late
//! poll catches up one sample at a time so nothing is skipped.

use nav_core::{AVERAGE_WALKING_SPEED_MPS, GeoPoint, SimRng, Timestamp, WatchId};

use crate::{LocationSource, PositionSample, SensorError, SensorEvent, SensorResult, WatchOptions};

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEGREE: f64 = 111_320.0;

pub struct SimulatedWalk {
    from:            GeoPoint,
    to:              GeoPoint,
    speed_mps:       f64,
    interval_ms:     u64,
    accuracy_m:      f64,
    accuracy_jitter: f64,
    position_jitter: f64,
    /// Offsets from the first poll during which the signal drops out.
    outage:          Option<(u64, u64)>,
    rng:             SimRng,

    active:          Option<WatchId>,
    next_id:         WatchId,
    started:         Option<Timestamp>,
    next_emit:       Timestamp,
    outage_reported: bool,
    last:            Option<PositionSample>,
}

impl SimulatedWalk {
    /// Walk from `from` to `to` at average walking speed, one sample per
    /// second with 5 m accuracy.
    pub fn new(from: GeoPoint, to: GeoPoint, seed: u64) -> Self {
        Self {
            from,
            to,
            speed_mps:       AVERAGE_WALKING_SPEED_MPS,
            interval_ms:     1_000,
            accuracy_m:      5.0,
            accuracy_jitter: 2.0,
            position_jitter: 1.5,
            outage:          None,
            rng:             SimRng::new(seed),
            active:          None,
            next_id:         WatchId(0),
            started:         None,
            next_emit:       Timestamp::ZERO,
            outage_reported: false,
            last:            None,
        }
    }

    pub fn speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps.max(0.0);
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms.max(1);
        self
    }

    /// Base accuracy and the symmetric noise added to it.
    pub fn accuracy(mut self, accuracy_m: f64, jitter_m: f64) -> Self {
        self.accuracy_m = accuracy_m;
        self.accuracy_jitter = jitter_m;
        self
    }

    /// Positional noise in metres; zero gives an exact straight line.
    pub fn position_jitter(mut self, metres: f64) -> Self {
        self.position_jitter = metres;
        self
    }

    /// Drop the signal between `start_ms` and `end_ms` after the first poll:
    /// one `PositionUnavailable` error, then silence.
    pub fn outage(mut self, start_ms: u64, end_ms: u64) -> Self {
        self.outage = Some((start_ms, end_ms));
        self
    }

    pub fn destination(&self) -> GeoPoint {
        self.to
    }

    /// Point on the path after `elapsed_ms` of walking, without noise.
    pub fn point_at(&self, elapsed_ms: u64) -> GeoPoint {
        let total = self.from.distance_m(self.to);
        let walked = self.speed_mps * elapsed_ms as f64 / 1000.0;
        let frac = if total > 0.0 { (walked / total).min(1.0) } else { 1.0 };
        GeoPoint::new(
            self.from.lat + (self.to.lat - self.from.lat) * frac,
            self.from.lng + (self.to.lng - self.from.lng) * frac,
        )
    }

    fn sample_at(&mut self, at: Timestamp, elapsed_ms: u64) -> PositionSample {
        let exact = self.point_at(elapsed_ms);
        let dlat = self.rng.jitter(self.position_jitter) / METRES_PER_DEGREE;
        let dlng = self.rng.jitter(self.position_jitter)
            / (METRES_PER_DEGREE * exact.lat.to_radians().cos().max(1e-6));
        let point = GeoPoint::new(exact.lat + dlat, exact.lng + dlng);
        let accuracy = (self.accuracy_m + self.rng.jitter(self.accuracy_jitter)).max(1.0);

        let sample = PositionSample::new(point, accuracy, at);
        // Stationary at the target: no direction of travel.
        if exact.distance_m(self.to) < 0.01 {
            sample
        } else {
            sample.with_heading(exact.bearing_deg(self.to))
        }
    }

    fn in_outage(&self, elapsed_ms: u64) -> bool {
        self.outage.is_some_and(|(start, end)| (start..end).contains(&elapsed_ms))
    }
}

impl LocationSource for SimulatedWalk {
    fn watch(&mut self, _options: &WatchOptions) -> SensorResult<WatchId> {
        let id = self.next_id;
        self.next_id = id.next();
        self.active = Some(id);
        Ok(id)
    }

    fn clear_watch(&mut self, id: WatchId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    fn poll(&mut self, id: WatchId, now: Timestamp) -> Option<SensorEvent> {
        if self.active != Some(id) {
            return None;
        }
        let start = match self.started {
            Some(t) => t,
            None => {
                self.started = Some(now);
                self.next_emit = now;
                now
            }
        };
        while self.next_emit <= now {
            let at = self.next_emit;
            self.next_emit = at + self.interval_ms;
            let elapsed = at.since(start);
            if self.in_outage(elapsed) {
                if !self.outage_reported {
                    self.outage_reported = true;
                    return Some(SensorEvent::Error(SensorError::PositionUnavailable));
                }
                continue;
            }
            let sample = self.sample_at(at, elapsed);
            self.last = Some(sample);
            return Some(SensorEvent::Sample(sample));
        }
        None
    }

    fn current_position(&mut self, _options: &WatchOptions) -> SensorResult<PositionSample> {
        Ok(self.last.unwrap_or_else(|| {
            PositionSample::new(self.from, self.accuracy_m, self.started.unwrap_or(Timestamp::ZERO))
        }))
    }
}
