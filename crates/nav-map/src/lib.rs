//! `nav-map` — map calibration, projection, assets and named locations.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`calibration`] | `PixelPoint`, `Anchor`, `CalibrationAnchors`                 |
//! | [`mapper`]      | `CoordinateMapper`, GPS ↔ pixel, bounds checks              |
//! | [`asset`]       | `MapAsset`, `MapAssetLoader` trait, `FileAssetLoader`        |
//! | [`directory`]   | `LocationDirectory`, `NamedLocation`, CSV loading            |
//! | [`error`]       | `MapError`, `MapResult<T>`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on calibration types.      |

pub mod asset;
pub mod calibration;
pub mod directory;
pub mod error;
pub mod mapper;

#[cfg(test)]
mod tests;

pub use asset::{FileAssetLoader, MapAsset, MapAssetLoader};
pub use calibration::{Anchor, CalibrationAnchors, PixelPoint};
pub use directory::{LocationDirectory, NamedLocation, load_directory_csv, load_directory_reader};
pub use error::{MapError, MapResult};
pub use mapper::CoordinateMapper;
