use nav_core::NavError;
use nav_map::MapError;
use nav_tracker::SensorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no destination selected")]
    NoDestination,

    /// Destinations cannot be swapped while guidance is running; cancel first.
    #[error("navigation already in progress")]
    NavigationInProgress,

    #[error("no campus location named {0:?}")]
    UnknownLocation(String),

    #[error("configuration error: {0}")]
    Config(#[from] NavError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("sensor error: {0}")]
    Sensor(#[from] SensorError),
}

pub type SessionResult<T> = Result<T, SessionError>;
