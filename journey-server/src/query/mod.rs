//! Route query engine.
//!
//! Filters the catalog by free text, orders the result by price, duration
//! or departure time, and supplies the map geometry for whichever route is
//! selected. Everything here is synchronous and side-effect free.

mod engine;
mod form;
mod geometry;
mod selection;
mod sort;

pub use engine::{RouteQuery, filter_routes, query, sort_routes};
pub use form::{
    InvalidJourneyType, JourneyType, MAX_PASSENGERS, MIN_PASSENGERS, PassengerCount, SearchForm,
};
pub use geometry::{Bounds, GeometryPoint, LineStyle, RouteGeometry};
pub use selection::Selection;
pub use sort::{InvalidSortKey, SortKey};
