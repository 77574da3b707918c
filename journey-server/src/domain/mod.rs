//! Domain types for the journey search.
//!
//! This module contains the core model types that represent validated
//! timetable data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod route;
mod station;
mod time;

pub use error::DomainError;
pub use route::{
    AlternateRoute, Price, Route, RouteId, RouteKind, RouteType, ServiceStatus, Stop, Stops,
};
pub use station::{Coordinates, InvalidStationCode, Station, StationCode};
pub use time::{InvalidTimeFormat, MINUTES_PER_DAY, TimeOfDay, TripDuration, trip_duration};
