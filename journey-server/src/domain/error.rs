//! Domain error types.
//!
//! These errors represent validation failures when building domain values.
//! Catalog-level problems (unknown stations, duplicate ids) live in
//! [`crate::catalog::CatalogError`].

use super::{InvalidStationCode, InvalidTimeFormat, StationCode};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A station code is malformed
    #[error(transparent)]
    InvalidStationCode(#[from] InvalidStationCode),

    /// A time is not in `HH:MM` form
    #[error(transparent)]
    InvalidTimeFormat(#[from] InvalidTimeFormat),

    /// Latitude or longitude out of range
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),

    /// Price is negative or not a number
    #[error("invalid price {0}: must be a non-negative number")]
    InvalidPrice(f64),

    /// Distance is negative or not a number
    #[error("invalid distance {0}: must be a non-negative number")]
    InvalidDistance(f64),

    /// A stop departs before it arrives
    #[error("invalid stop at {station}: departs {departure} before arriving {arrival}")]
    InvalidStop {
        station: StationCode,
        arrival: String,
        departure: String,
    },

    /// An indirect route was given no stops
    #[error("indirect route must have at least one stop")]
    EmptyStops,

    /// Origin and destination are the same station
    #[error("route starts and ends at {0}")]
    SameEndpoints(StationCode),
}
