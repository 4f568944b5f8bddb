//! Named campus locations used for destination search.
//!
//! # CSV format
//!
//! ```csv
//! name,description,lat,lng
//! Library,Central library and study area,18.5230157,73.7305252
//! Cafeteria,Main dining facility,18.5228207,73.7310949
//! ```
//!
//! The directory is read-only input to destination selection; it never
//! touches navigation state.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nav_core::{GeoPoint, LocationId};

use crate::{CoordinateMapper, MapError, MapResult};

/// One searchable campus location.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedLocation {
    pub id:          LocationId,
    pub name:        String,
    pub description: String,
    pub point:       GeoPoint,
}

#[derive(Deserialize)]
struct LocationRecord {
    name:        String,
    description: String,
    lat:         f64,
    lng:         f64,
}

/// Static list of named locations, indexed by [`LocationId`].
#[derive(Clone, Debug, Default)]
pub struct LocationDirectory {
    entries: Vec<NamedLocation>,
}

impl LocationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a location and return its id.
    ///
    /// # Errors
    ///
    /// [`MapError::Directory`] for an invalid coordinate, an empty name, or
    /// more entries than `LocationId` can index.
    pub fn push(
        &mut self,
        name:        impl Into<String>,
        description: impl Into<String>,
        point:       GeoPoint,
    ) -> MapResult<LocationId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MapError::Directory("location name must not be empty".into()));
        }
        if !point.is_valid() {
            return Err(MapError::Directory(format!("location {name:?} has invalid coordinate {point}")));
        }
        let id = LocationId::try_from(self.entries.len())
            .ok()
            .filter(|id| *id != LocationId::INVALID)
            .ok_or_else(|| MapError::Directory("too many locations".into()))?;
        self.entries.push(NamedLocation {
            id,
            name,
            description: description.into(),
            point,
        });
        Ok(id)
    }

    pub fn get(&self, id: LocationId) -> Option<&NamedLocation> {
        self.entries.get(id.index())
    }

    /// Exact, case-insensitive name lookup.
    pub fn find(&self, name: &str) -> Option<&NamedLocation> {
        let name = name.trim();
        self.entries.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring match on name or description.  A blank
    /// query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&NamedLocation> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|l| {
                l.name.to_lowercase().contains(&query)
                    || l.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedLocation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load a directory from a CSV file.  See [`load_directory_reader`].
pub fn load_directory_csv(
    path:   &Path,
    mapper: Option<&CoordinateMapper>,
) -> MapResult<LocationDirectory> {
    let file = std::fs::File::open(path)?;
    load_directory_reader(file, mapper)
}

/// Like [`load_directory_csv`] but accepts any `Read` source.
///
/// When `mapper` is given, every location must lie inside its calibrated
/// area, so nothing selectable from the directory can be rejected later.
pub fn load_directory_reader<R: Read>(
    reader: R,
    mapper: Option<&CoordinateMapper>,
) -> MapResult<LocationDirectory> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut directory = LocationDirectory::new();

    for result in csv_reader.deserialize::<LocationRecord>() {
        let row = result?;
        let point = GeoPoint::new(row.lat, row.lng);
        if let Some(mapper) = mapper {
            if !mapper.is_within_bounds(point) {
                return Err(MapError::Directory(format!(
                    "location {:?} at {point} is outside the calibrated map area",
                    row.name
                )));
            }
        }
        directory.push(row.name, row.description, point)?;
    }

    Ok(directory)
}
