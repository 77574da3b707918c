//! Application state for the web layer.

use crate::catalog::{CatalogState, RouteCatalog};

/// Shared application state.
///
/// Cloned into every handler; the catalog handle itself is reference counted.
#[derive(Clone, Default)]
pub struct AppState {
    /// Route catalog, possibly still loading
    pub catalog: CatalogState,
}

impl AppState {
    /// Create a new app state around a catalog handle.
    pub fn new(catalog: CatalogState) -> Self {
        Self { catalog }
    }

    /// App state with the catalog already available.
    pub fn with_catalog(catalog: RouteCatalog) -> Self {
        Self::new(CatalogState::ready(catalog))
    }
}
