//! Station registry and route catalog.
//!
//! The catalog is static reference data: loaded once (from the embedded
//! sample or a JSON file), validated eagerly, then shared read-only.

mod error;
mod records;
mod registry;
mod route_catalog;
mod sample;
mod state;

pub use error::CatalogError;
pub use records::{AlternateRouteRecord, CatalogRecords, RouteRecord, StationRecord, StopRecord};
pub use registry::StationRegistry;
pub use route_catalog::RouteCatalog;
pub use sample::sample_catalog;
pub use state::CatalogState;
