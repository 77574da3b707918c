//! Embedded sample catalog.

use super::error::CatalogError;
use super::route_catalog::RouteCatalog;

const SAMPLE_CATALOG_JSON: &str = include_str!("sample_catalog.json");

/// The built-in catalog served when no catalog file is configured.
pub fn sample_catalog() -> Result<RouteCatalog, CatalogError> {
    RouteCatalog::from_json(SAMPLE_CATALOG_JSON)
}
