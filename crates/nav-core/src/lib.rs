//! `nav-core` — foundational types for the campus navigation core.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`geo`]         | `GeoPoint`, haversine distance, bearing, walking time      |
//! | [`time`]        | `Timestamp`, `NavConfig`                                   |
//! | [`ids`]         | `WatchId`, `LocationId`                                    |
//! | [`rng`]         | `SimRng` for simulated sensors                             |
//! | [`format`]      | `format_distance`, `format_duration`                       |
//! | [`error`]       | `NavError`, `NavResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod format;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NavError, NavResult};
pub use format::{format_distance, format_duration};
pub use geo::{AVERAGE_WALKING_SPEED_MPS, EARTH_RADIUS_M, GeoPoint, compass_point, walking_seconds};
pub use ids::{LocationId, WatchId};
pub use rng::SimRng;
pub use time::{NavConfig, Timestamp};
