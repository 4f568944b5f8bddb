//! Fluent builder for constructing a [`Navigator`].

use nav_core::{GeoPoint, NavConfig, Timestamp};
use nav_map::{CalibrationAnchors, CoordinateMapper, LocationDirectory, MapAsset};
use nav_tracker::{LocationSource, PositionTracker};
use tracing::{info, warn};

use crate::{Announcer, Navigator, SessionResult};

/// Fluent builder for [`Navigator<S, A>`].
///
/// # Required inputs
///
/// - [`NavConfig`]: walking speed, arrival radius, sensor timings, …
/// - [`CalibrationAnchors`]: the map's two anchor points
/// - `S: LocationSource`: the live-location collaborator
/// - `A: Announcer`: the speech collaborator
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                 |
/// |-------------------|-----------------------------------------|
/// | `.directory(d)`   | Empty `LocationDirectory`               |
/// | `.fallback(p)`    | No fallback position                    |
/// | `.map_asset(a)`   | None; load later with `load_map`        |
///
/// # Example
///
/// ```rust,ignore
/// let mut nav = NavigatorBuilder::new(config, CalibrationAnchors::FLAME_CAMPUS, source, SilentAnnouncer)
///     .directory(directory)
///     .build(Timestamp::ZERO)?;
/// nav.select_named("Library")?;
/// nav.start_navigation(now)?;
/// nav.pump(now, &mut NoopObserver);
/// ```
pub struct NavigatorBuilder<S: LocationSource, A: Announcer> {
    config:    NavConfig,
    anchors:   CalibrationAnchors,
    source:    S,
    announcer: A,
    directory: Option<LocationDirectory>,
    fallback:  Option<GeoPoint>,
    map_asset: Option<MapAsset>,
}

impl<S: LocationSource, A: Announcer> NavigatorBuilder<S, A> {
    /// Create a builder with all required inputs.
    pub fn new(config: NavConfig, anchors: CalibrationAnchors, source: S, announcer: A) -> Self {
        Self {
            config,
            anchors,
            source,
            announcer,
            directory: None,
            fallback:  None,
            map_asset: None,
        }
    }

    /// Campus locations for [`Navigator::select_named`].
    pub fn directory(mut self, directory: LocationDirectory) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Position shown before the first real fix (e.g. the campus gate).
    pub fn fallback(mut self, point: GeoPoint) -> Self {
        self.fallback = Some(point);
        self
    }

    /// An already-fetched map image.
    pub fn map_asset(mut self, asset: MapAsset) -> Self {
        self.map_asset = Some(asset);
        self
    }

    /// Validate configuration and calibration, subscribe the sensor, and
    /// make the one-shot startup check of permission and availability.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid [`NavConfig`] or on anchors that cannot
    /// define a projection.  A sensor that refuses to start is *not* an
    /// error here: the failure reaches the observer on the first pump and
    /// [`Navigator::retry`] can try again.
    pub fn build(self, now: Timestamp) -> SessionResult<Navigator<S, A>> {
        self.config.validate()?;
        let mapper = CoordinateMapper::new(self.anchors)?;

        let mut tracker = PositionTracker::new(self.source, &self.config);
        if let Some(point) = self.fallback {
            if !mapper.is_within_bounds(point) {
                warn!(%point, "fallback position lies outside the calibrated map");
            }
            tracker = tracker.with_fallback(point);
        }
        match tracker.start(now) {
            Ok(()) => {
                if let Err(err) = tracker.probe_availability(now) {
                    warn!(error = %err, route = ?err.setup_route(), "location check failed at startup");
                }
            }
            Err(err) => warn!(error = %err, route = ?err.setup_route(), "sensor unavailable at startup"),
        }

        let directory = self.directory.unwrap_or_default();
        info!(
            locations = directory.len(),
            map_loaded = self.map_asset.is_some(),
            "navigator ready"
        );
        Ok(Navigator::from_parts(
            self.config,
            mapper,
            tracker,
            self.announcer,
            directory,
            self.map_asset,
            now,
        ))
    }
}
