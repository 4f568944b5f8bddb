//! Unit tests for nav-tracker.

use nav_core::{GeoPoint, NavConfig, Timestamp};

use crate::{GpsQuality, PositionSample};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ACADEMIC_BLOCK: GeoPoint = GeoPoint::new(18.5226207, 73.7307949);
const LIBRARY: GeoPoint = GeoPoint::new(18.5245123, 73.7298456);

fn sample(accuracy_m: f64, at: u64) -> PositionSample {
    PositionSample::new(ACADEMIC_BLOCK, accuracy_m, Timestamp(at))
}

// ── GpsQuality ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod quality {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(GpsQuality::classify(0.0), GpsQuality::Accurate);
        assert_eq!(GpsQuality::classify(10.0), GpsQuality::Accurate);
        assert_eq!(GpsQuality::classify(10.01), GpsQuality::Degraded);
        assert_eq!(GpsQuality::classify(50.0), GpsQuality::Degraded);
        assert_eq!(GpsQuality::classify(50.01), GpsQuality::Lost);
    }

    #[test]
    fn nan_accuracy_is_lost() {
        assert_eq!(GpsQuality::classify(f64::NAN), GpsQuality::Lost);
    }

    #[test]
    fn only_lost_is_unusable() {
        assert!(GpsQuality::Accurate.is_usable());
        assert!(GpsQuality::Degraded.is_usable());
        assert!(!GpsQuality::Lost.is_usable());
    }

    #[test]
    fn sample_validation() {
        assert!(sample(5.0, 0).validate().is_ok());
        assert!(sample(-1.0, 0).validate().is_err());
        assert!(sample(5.0, 0).with_heading(400.0).validate().is_err());
        let bad = PositionSample::new(GeoPoint::new(95.0, 0.0), 5.0, Timestamp::ZERO);
        assert!(bad.validate().is_err());
    }
}

// ── SensorError ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use crate::{SensorError, SetupRoute};

    #[test]
    fn transient_errors() {
        assert!(SensorError::Timeout.is_transient());
        assert!(SensorError::PositionUnavailable.is_transient());
        assert!(!SensorError::PermissionDenied.is_transient());
        assert!(!SensorError::Unavailable.is_transient());
    }

    #[test]
    fn setup_routes() {
        assert_eq!(SensorError::PermissionDenied.setup_route(), SetupRoute::LocationSetup);
        assert_eq!(SensorError::Unavailable.setup_route(), SetupRoute::LocationSetup);
        assert_eq!(SensorError::Timeout.setup_route(), SetupRoute::SignalLost);
    }
}

// ── PositionTracker ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tracker {
    use super::*;
    use crate::{PositionOrigin, PositionTracker, ScriptedSource, SensorError, TrackerEvent};

    fn drain<S: crate::LocationSource>(t: &mut PositionTracker<S>, now: u64) -> Vec<TrackerEvent> {
        let mut out = Vec::new();
        while let Some(events) = t.next_events(Timestamp(now)) {
            out.extend(events);
        }
        out
    }

    #[test]
    fn first_good_sample_upgrades_quality() {
        let mut src = ScriptedSource::with_samples([sample(5.0, 0)]);
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();
        let events = drain(&mut t, 0);
        assert_eq!(
            events,
            vec![
                TrackerEvent::QualityChanged { from: GpsQuality::Lost, to: GpsQuality::Accurate },
                TrackerEvent::Position(sample(5.0, 0)),
            ]
        );
        assert_eq!(t.quality(), GpsQuality::Accurate);
    }

    #[test]
    fn coarse_sample_is_not_forwarded() {
        let mut src = ScriptedSource::with_samples([sample(5.0, 0), sample(80.0, 1000)]);
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();
        let events = drain(&mut t, 1000);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            TrackerEvent::QualityChanged { from: GpsQuality::Accurate, to: GpsQuality::Lost }
        );
        assert_eq!(t.last_good().unwrap().accuracy_m, 5.0);
    }

    #[test]
    fn invalid_sample_is_dropped() {
        let bad = PositionSample::new(GeoPoint::new(120.0, 0.0), 5.0, Timestamp::ZERO);
        let mut src = ScriptedSource::with_samples([bad]);
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();
        assert!(drain(&mut t, 0).is_empty());
        assert!(t.last_good().is_none());
    }

    #[test]
    fn failure_keeps_last_known_position() {
        let mut src = ScriptedSource::with_samples([sample(5.0, 0)]);
        src.push_error(SensorError::PermissionDenied);
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();
        let events = drain(&mut t, 500);
        assert!(events.contains(&TrackerEvent::Error(SensorError::PermissionDenied)));
        assert_eq!(t.quality(), GpsQuality::Lost);
        let shown = t.display_position().unwrap();
        assert_eq!(shown.point, ACADEMIC_BLOCK);
        assert_eq!(shown.origin, PositionOrigin::LastKnown);
    }

    #[test]
    fn permission_denied_ends_the_watch_but_timeout_does_not() {
        let mut src = ScriptedSource::new();
        src.push_error(SensorError::Timeout);
        src.push_error(SensorError::PermissionDenied);
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();
        t.next_events(Timestamp::ZERO);
        assert!(t.is_watching());
        t.next_events(Timestamp::ZERO);
        assert!(!t.is_watching());
    }

    #[test]
    fn staleness_downgrades_to_lost() {
        let config = NavConfig::default();
        let mut src = ScriptedSource::with_samples([sample(5.0, 0)]);
        let mut t = PositionTracker::new(&mut src, &config);
        t.start(Timestamp::ZERO).unwrap();
        drain(&mut t, 0);
        assert!(t.check_staleness(Timestamp(config.stale_after_ms)).is_none());
        let ev = t.check_staleness(Timestamp(config.stale_after_ms + 1));
        assert_eq!(ev, Some(TrackerEvent::QualityChanged { from: GpsQuality::Accurate, to: GpsQuality::Lost }));
        assert_eq!(t.lost_for(Timestamp(config.stale_after_ms + 501)), Some(500));
    }

    #[test]
    fn fallback_is_shown_before_first_fix() {
        let mut src = ScriptedSource::new();
        src.fail_watch_with(Some(SensorError::Unavailable));
        let mut t = PositionTracker::new(&mut src, &NavConfig::default()).with_fallback(LIBRARY);
        assert_eq!(t.start(Timestamp::ZERO), Err(SensorError::Unavailable));
        let shown = t.display_position().unwrap();
        assert_eq!(shown.origin, PositionOrigin::Fallback);
        assert_eq!(t.quality(), GpsQuality::Lost);
        // The start failure is queued for the consumer.
        assert_eq!(t.next_events(Timestamp::ZERO), Some(vec![TrackerEvent::Error(SensorError::Unavailable)]));
    }

    #[test]
    fn stop_is_idempotent_and_drop_unsubscribes() {
        let mut src = ScriptedSource::new();
        {
            let mut t = PositionTracker::new(&mut src, &NavConfig::default());
            t.start(Timestamp::ZERO).unwrap();
            t.stop();
            t.stop();
            t.start(Timestamp::ZERO).unwrap();
        }
        assert_eq!(src.watches, 2);
        assert_eq!(src.clears, 2);
        assert!(!src.is_watching());
    }

    #[test]
    fn deliberate_stop_is_not_a_signal_loss() {
        let config = NavConfig::default();
        let mut src = ScriptedSource::with_samples([sample(5.0, 0), sample(6.0, 1_000)]);
        let mut t = PositionTracker::new(&mut src, &config);
        t.start(Timestamp::ZERO).unwrap();
        t.next_events(Timestamp::ZERO);
        t.stop();

        // The unread sample stays with the source until the next watch.
        assert_eq!(t.source().pending(), 1);
        assert!(t.next_events(Timestamp(1_000)).is_none());
        assert_eq!(t.display_position().unwrap().origin, PositionOrigin::LastKnown);
        let later = Timestamp(config.stale_after_ms * 3);
        assert!(t.check_staleness(later).is_none());
        assert_eq!(t.lost_for(later), None);

        t.start(later).unwrap();
        let events = drain(&mut t, later.0);
        assert_eq!(events[0], TrackerEvent::QualityChanged { from: GpsQuality::Lost, to: GpsQuality::Accurate });
        assert_eq!(t.source().pending(), 0);
    }

    #[test]
    fn startup_check_reports_denial_only() {
        let mut src = ScriptedSource::new();
        src.push_probe(Err(SensorError::Timeout));
        src.push_probe(Err(SensorError::PermissionDenied));
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.start(Timestamp::ZERO).unwrap();

        assert_eq!(t.probe_availability(Timestamp::ZERO), Ok(()));
        assert!(t.is_watching());
        assert!(t.next_events(Timestamp::ZERO).is_none());

        assert_eq!(t.probe_availability(Timestamp(10)), Err(SensorError::PermissionDenied));
        assert!(!t.is_watching());
        assert_eq!(
            t.next_events(Timestamp(10)),
            Some(vec![TrackerEvent::Error(SensorError::PermissionDenied)])
        );
    }

    #[test]
    fn startup_check_queues_a_fix() {
        let mut src = ScriptedSource::new();
        src.push_probe(Ok(sample(8.0, 0)));
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        t.probe_availability(Timestamp::ZERO).unwrap();
        let events = drain(&mut t, 0);
        assert_eq!(events.last(), Some(&TrackerEvent::Position(sample(8.0, 0))));
        assert_eq!(t.quality(), GpsQuality::Accurate);
    }

    #[test]
    fn probe_applies_fresh_sample() {
        let mut src = ScriptedSource::new();
        src.push_probe(Ok(sample(8.0, 100)));
        src.push_probe(Err(SensorError::Timeout));
        let mut t = PositionTracker::new(&mut src, &NavConfig::default());
        let events = t.probe(Timestamp(100));
        assert!(events.contains(&TrackerEvent::Position(sample(8.0, 100))));
        let events = t.probe(Timestamp(200));
        assert!(events.contains(&TrackerEvent::Error(SensorError::Timeout)));
    }
}

// ── SimulatedWalk ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulated {
    use super::*;
    use crate::{LocationSource, SensorEvent, SimulatedWalk, WatchOptions};

    fn opts() -> WatchOptions {
        WatchOptions::live(&NavConfig::default())
    }

    #[test]
    fn emits_one_sample_per_interval() {
        let mut walk = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 7);
        let id = walk.watch(&opts()).unwrap();
        assert!(matches!(walk.poll(id, Timestamp(0)), Some(SensorEvent::Sample(_))));
        assert!(walk.poll(id, Timestamp(500)).is_none());
        assert!(walk.poll(id, Timestamp(2000)).is_some());
        assert!(walk.poll(id, Timestamp(2000)).is_some());
        assert!(walk.poll(id, Timestamp(2000)).is_none());
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 11);
        let mut b = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 11);
        let (ia, ib) = (a.watch(&opts()).unwrap(), b.watch(&opts()).unwrap());
        for ms in (0..5000).step_by(1000) {
            assert_eq!(a.poll(ia, Timestamp(ms)), b.poll(ib, Timestamp(ms)));
        }
    }

    #[test]
    fn reaches_destination_and_stops_heading() {
        let mut walk = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 3).position_jitter(0.0);
        let id = walk.watch(&opts()).unwrap();
        let mut last = None;
        let mut now = 0;
        while now <= 300_000 {
            if let Some(SensorEvent::Sample(s)) = walk.poll(id, Timestamp(now)) {
                last = Some(s);
            }
            now += 1000;
        }
        let last = last.unwrap();
        assert!(last.point.distance_m(LIBRARY) < 0.5);
        assert!(last.heading_deg.is_none());
    }

    #[test]
    fn outage_reports_once_then_goes_silent() {
        let mut walk = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 3).outage(1000, 4000);
        let id = walk.watch(&opts()).unwrap();
        assert!(matches!(walk.poll(id, Timestamp(0)), Some(SensorEvent::Sample(_))));
        assert!(matches!(walk.poll(id, Timestamp(3000)), Some(SensorEvent::Error(_))));
        assert!(walk.poll(id, Timestamp(3000)).is_none());
        assert!(matches!(walk.poll(id, Timestamp(4000)), Some(SensorEvent::Sample(_))));
    }

    #[test]
    fn cleared_watch_delivers_nothing() {
        let mut walk = SimulatedWalk::new(ACADEMIC_BLOCK, LIBRARY, 3);
        let id = walk.watch(&opts()).unwrap();
        walk.clear_watch(id);
        assert!(walk.poll(id, Timestamp(0)).is_none());
    }
}
