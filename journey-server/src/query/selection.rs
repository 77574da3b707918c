//! Which route is currently shown on the map.

use crate::catalog::{CatalogError, RouteCatalog};
use crate::domain::{Route, RouteId};

/// Current route selection.
///
/// Held by the caller and passed in explicitly; there is no ambient
/// selection state. Once something is selected it stays selected until
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(RouteId),
}

impl Selection {
    /// Initial selection for a freshly loaded catalog: its first route, if any.
    pub fn initial(catalog: &RouteCatalog) -> Self {
        catalog
            .first()
            .map_or(Selection::NoSelection, |route| {
                Selection::Selected(route.id().clone())
            })
    }

    /// Select a route.
    pub fn select(&mut self, route: &Route) {
        *self = Selection::Selected(route.id().clone());
    }

    /// Select a route by id.
    ///
    /// An unknown id leaves the current selection in place.
    pub fn select_id<'a>(
        &mut self,
        catalog: &'a RouteCatalog,
        id: &str,
    ) -> Result<&'a Route, CatalogError> {
        let route = catalog
            .get(id)
            .ok_or_else(|| CatalogError::RouteNotFound { id: id.to_string() })?;
        self.select(route);
        Ok(route)
    }

    /// The selected route, resolved against `catalog`.
    pub fn route<'a>(&self, catalog: &'a RouteCatalog) -> Option<&'a Route> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(id) => catalog.get(id.as_str()),
        }
    }

    pub fn id(&self) -> Option<&RouteId> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, route: &Route) -> bool {
        matches!(self, Selection::Selected(id) if id == route.id())
    }
}
