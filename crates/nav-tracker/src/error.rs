use thiserror::Error;

/// Failures reported by a location source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The device has no location capability at all.
    #[error("location sensor unavailable")]
    Unavailable,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out")]
    Timeout,

    #[error("position unavailable")]
    PositionUnavailable,

    /// A sample arrived with values outside their physical ranges.
    #[error("invalid sample: {0}")]
    InvalidSample(String),
}

/// Where the UI should send the user after a sensor failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupRoute {
    /// Permission or capability problem: show location setup.
    LocationSetup,
    /// Transient signal problem: show last-known position and retry.
    SignalLost,
}

impl SensorError {
    /// Transient errors are retried by re-subscribing and never tear down
    /// navigation state.
    pub fn is_transient(&self) -> bool {
        matches!(self, SensorError::Timeout | SensorError::PositionUnavailable)
    }

    pub fn setup_route(&self) -> SetupRoute {
        match self {
            SensorError::Unavailable | SensorError::PermissionDenied => SetupRoute::LocationSetup,
            _ => SetupRoute::SignalLost,
        }
    }
}

pub type SensorResult<T> = Result<T, SensorError>;
