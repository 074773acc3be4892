use crate::{config::ConfigError, position::PositionError, storage::StorageError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    LocationUnavailable(PositionError),

    #[error("Directions failed due to: {status}")]
    RouteCalculationFailed { status: String },

    #[error("no parking location has been saved")]
    MissingParkedLocation,

    #[error("stored value {value:?} for {key} is not a coordinate")]
    CorruptParkedLocation { key: &'static str, value: String },

    #[error("a location request is already in flight")]
    RequestInFlight,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<PositionError> for Error {
    fn from(error: PositionError) -> Self {
        Error::LocationUnavailable(error)
    }
}
