//! `nav-tracker` — live position tracking for the campus navigation core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`sample`]    | `PositionSample`, `GpsQuality`                                  |
//! | [`source`]    | `LocationSource` trait, `WatchOptions`, `ScriptedSource`        |
//! | [`tracker`]   | `PositionTracker`, `TrackerEvent`, `DisplayPosition`            |
//! | [`simulated`] | `SimulatedWalk` seeded straight-line source                     |
//! | [`error`]     | `SensorError`, `SetupRoute`, `SensorResult<T>`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                          |
//! |---------|-----------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on samples and display types. |

pub mod error;
pub mod sample;
pub mod simulated;
pub mod source;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use error::{SensorError, SensorResult, SetupRoute};
pub use sample::{GpsQuality, PositionSample};
pub use simulated::SimulatedWalk;
pub use source::{LocationSource, ScriptedSource, SensorEvent, WatchOptions};
pub use tracker::{DisplayPosition, PositionOrigin, PositionTracker, TrackerEvent};
