//! campus-walk — simulated walk across the FLAME University campus.
//!
//! Builds a navigator over the calibrated campus map, picks a destination
//! from the campus directory and replays a seeded walk towards it, with a
//! short GPS outage on the way.  Guidance, announcements and status lines
//! are printed as they happen.
//!
//! ```text
//! campus-walk [config.json]
//! RUST_LOG=debug campus-walk
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nav_core::{NavConfig, Timestamp, format_distance, format_duration};
use nav_map::{CalibrationAnchors, CoordinateMapper, FileAssetLoader, load_directory_reader};
use nav_session::{
    Announcement, Announcer, Instruction, NavObserver, NavigatorBuilder, Phase, Snapshot,
};
use nav_tracker::{GpsQuality, SensorError, SimulatedWalk};

// ── Constants ─────────────────────────────────────────────────────────────────

const STEP_MS:         u64 = 1_000;
const STATUS_EVERY_MS: u64 = 15_000;
const MAX_WALK_MS:     u64 = 15 * 60_000;

// ── Campus directory ──────────────────────────────────────────────────────────

const LOCATIONS_CSV: &str = "\
name,description,lat,lng\n\
Main Academic Block,Central academic building,18.5226207,73.7307949\n\
Library,Central library and study area,18.5230157,73.7305252\n\
Student Hostel,Residential accommodation,18.5235557,73.7315252\n\
Cafeteria,Main dining facility,18.5228207,73.7310949\n\
Sports Complex,Athletic facilities,18.5220207,73.7320949\n\
Auditorium,Main event venue,18.5232207,73.7302949\n\
Admin Block,Administrative offices,18.5234207,73.7308949\n\
Medical Center,Campus health services,18.5225207,73.7312949\n\
";

// ── Configuration ─────────────────────────────────────────────────────────────

/// Optional JSON file; every field has a built-in default.
#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    nav:         NavConfig,
    anchors:     CalibrationAnchors,
    map_url:     String,
    /// Directory searched for the map image's file name.
    map_dir:     Option<PathBuf>,
    start:       String,
    destination: String,
    seed:        u64,
    /// Signal outage, in ms after the walk begins.
    outage_ms:   Option<(u64, u64)>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            nav:         NavConfig::default(),
            anchors:     CalibrationAnchors::FLAME_CAMPUS,
            map_url:     "https://raw.githubusercontent.com/Jaycubic/FLAMECampusSVG/main/CampusMap.svg".into(),
            map_dir:     None,
            start:       "Sports Complex".into(),
            destination: "Auditorium".into(),
            seed:        42,
            outage_ms:   Some((60_000, 80_000)),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Prints what a speech engine would say.
struct ConsoleVoice;

impl Announcer for ConsoleVoice {
    fn announce(&mut self, text: &str) {
        println!("    [voice] {text}");
    }
}

struct ConsoleObserver {
    next_status:   u64,
    announcements: usize,
    arrived_at:    Option<Timestamp>,
    last:          Option<Snapshot>,
}

impl ConsoleObserver {
    fn new() -> Self {
        Self { next_status: 0, announcements: 0, arrived_at: None, last: None }
    }
}

impl NavObserver for ConsoleObserver {
    fn on_phase_change(&mut self, from: Phase, to: Phase) {
        println!("  phase: {from} -> {to}");
    }

    fn on_instruction(&mut self, instruction: &Instruction) {
        println!("  > {} ({})", instruction.text, format_distance(instruction.distance_m));
    }

    fn on_announcement(&mut self, _announcement: &Announcement) {
        self.announcements += 1;
    }

    fn on_quality_change(&mut self, from: GpsQuality, to: GpsQuality) {
        println!("  gps: {from} -> {to}");
    }

    fn on_sensor_error(&mut self, error: &SensorError) {
        println!("  sensor: {error} (route: {:?})", error.setup_route());
    }

    fn on_snapshot(&mut self, snap: &Snapshot) {
        if snap.phase == Phase::Arrived && self.arrived_at.is_none() {
            self.arrived_at = Some(snap.at);
        }
        if snap.at.0 >= self.next_status {
            self.next_status = snap.at.0 + STATUS_EVERY_MS;
            let pixel = snap
                .position_px
                .map_or_else(|| "off-map".to_owned(), |p| p.to_string());
            println!(
                "[{:>6.1}s] {:<10} {:>7} eta {:>6}  progress {:>3.0}%  gps {}{}  px {}",
                snap.at.0 as f64 / 1000.0,
                snap.phase.as_str(),
                snap.distance_text(),
                snap.eta_text(),
                snap.progress().unwrap_or(0.0) * 100.0,
                snap.quality,
                if snap.stale { " (stale)" } else { "" },
                pixel,
            );
        }
        self.last = Some(snap.clone());
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    println!("=== campus-walk: campus navigation core ===");

    // 1. Calibration and directory.
    let mapper = CoordinateMapper::new(config.anchors)?;
    let directory = load_directory_reader(Cursor::new(LOCATIONS_CSV), Some(&mapper))?;
    println!("Directory: {} campus locations", directory.len());

    let start = directory
        .find(&config.start)
        .with_context(|| format!("unknown start location {:?}", config.start))?
        .point;
    let target = directory
        .find(&config.destination)
        .with_context(|| format!("unknown destination {:?}", config.destination))?
        .point;
    let straight_line = start.distance_m(target);
    println!(
        "Walk: {} -> {}  ({}, about {} on foot)",
        config.start,
        config.destination,
        format_distance(straight_line),
        format_duration(nav_core::walking_seconds(straight_line, config.nav.walking_speed_mps)),
    );
    println!();

    // 2. Sensor: a seeded walk with an optional outage.
    let mut walk = SimulatedWalk::new(start, target, config.seed).speed(config.nav.walking_speed_mps);
    if let Some((from, to)) = config.outage_ms {
        walk = walk.outage(from, to);
    }

    // 3. Navigator.
    let t0 = Timestamp::ZERO;
    let mut nav = NavigatorBuilder::new(config.nav.clone(), config.anchors, walk, ConsoleVoice)
        .directory(directory)
        .fallback(start)
        .build(t0)?;

    if let Some(dir) = &config.map_dir {
        let mut loader = FileAssetLoader::new(dir);
        if let Err(e) = nav.load_map(&mut loader, &config.map_url) {
            warn!(error = %e, "continuing without map image");
        }
    }

    // 4. First fix, then choose and start.
    let mut obs = ConsoleObserver::new();
    nav.pump(t0, &mut obs);
    nav.select_named(&config.destination)?;
    nav.start_navigation(t0)?;

    // 5. Walk until the arrival display has ended.
    let mut now = t0;
    while now.0 < MAX_WALK_MS {
        now = now + STEP_MS;
        nav.pump(now, &mut obs);
        if obs.arrived_at.is_some() && nav.phase() != Phase::Arrived {
            break;
        }
    }
    nav.shutdown();

    // 6. Summary.
    println!();
    match obs.arrived_at {
        Some(at) => println!("Arrived after {}", format_duration(at.0 as f64 / 1000.0)),
        None => println!("Did not arrive within {}", format_duration(MAX_WALK_MS as f64 / 1000.0)),
    }
    println!("Announcements: {}", obs.announcements);
    if let Some(last) = &obs.last {
        println!("Final phase:   {}", last.phase);
        println!("GPS quality:   {}", last.quality);
        if let Some(pos) = &last.position {
            println!("Last position: {} ({:?})", pos.point, pos.origin);
        }
    }

    Ok(())
}
