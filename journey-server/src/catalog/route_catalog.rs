//! Validated, immutable route catalog.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{
    AlternateRoute, DomainError, Price, Route, RouteId, RouteKind, RouteType, Stop, Stops,
    TimeOfDay,
};

use super::error::CatalogError;
use super::records::{AlternateRouteRecord, CatalogRecords, RouteRecord, StopRecord};
use super::registry::StationRegistry;

/// The fixed, ordered set of routes together with the stations they reference.
///
/// Every station a route or stop refers to is guaranteed to be in the
/// registry. Catalog order is preserved and used as the sort tiebreaker.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    registry: StationRegistry,
    routes: Vec<Route>,
}

impl RouteCatalog {
    /// Validate raw records and build the catalog.
    ///
    /// Validation is eager: the first bad station or route fails the whole
    /// load, so nothing downstream ever sees an unresolved station code.
    pub fn load(records: CatalogRecords) -> Result<Self, CatalogError> {
        let registry = StationRegistry::from_records(&records.stations)?;

        let mut seen = HashSet::with_capacity(records.routes.len());
        let mut routes = Vec::with_capacity(records.routes.len());

        for record in &records.routes {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateRouteId(record.id.clone()));
            }
            let route = route_from_record(record, &registry).inspect_err(|e| {
                warn!(route = %record.id, error = %e, "rejecting catalog");
            })?;
            routes.push(route);
        }

        debug!(
            stations = registry.len(),
            routes = routes.len(),
            "catalog validated"
        );

        Ok(Self { registry, routes })
    }

    /// Parse and validate a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: CatalogRecords = serde_json::from_str(json)?;
        Self::load(records)
    }

    /// Read, parse and validate a catalog file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// All routes in catalog order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id().as_str() == id)
    }

    pub fn first(&self) -> Option<&Route> {
        self.routes.first()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn route_from_record(
    record: &RouteRecord,
    registry: &StationRegistry,
) -> Result<Route, CatalogError> {
    let invalid = |source: DomainError| CatalogError::InvalidRoute {
        id: record.id.clone(),
        source,
    };

    let from = registry.resolve(&record.from)?;
    let to = registry.resolve(&record.to)?;
    let departure = TimeOfDay::parse(&record.departure).map_err(|e| invalid(e.into()))?;
    let arrival = TimeOfDay::parse(&record.arrival).map_err(|e| invalid(e.into()))?;
    let price = Price::new(record.price).map_err(invalid)?;

    let stop_records = record.stops.as_deref().unwrap_or_default();
    let kind = match (record.route_type, stop_records.is_empty()) {
        (RouteType::Direct, true) => RouteKind::Direct,
        (RouteType::Indirect, false) => {
            let stops = stop_records
                .iter()
                .map(|s| stop_from_record(s, registry, &record.id))
                .collect::<Result<Vec<_>, _>>()?;
            RouteKind::Indirect(Stops::new(stops).map_err(invalid)?)
        }
        (declared, _) => {
            return Err(CatalogError::TypeMismatch {
                id: record.id.clone(),
                declared,
                stops: stop_records.len(),
            });
        }
    };

    let mut route = Route::new(
        RouteId::new(record.id.clone()),
        record.name.clone(),
        from,
        to,
        departure,
        arrival,
        price,
        kind,
    )
    .map_err(invalid)?
    .with_status(record.status);

    if let Some(alt) = &record.alternate_route {
        route = route.with_alternate_route(alternate_from_record(alt).map_err(invalid)?);
    }

    Ok(route)
}

fn stop_from_record(
    record: &StopRecord,
    registry: &StationRegistry,
    route_id: &str,
) -> Result<Stop, CatalogError> {
    let invalid = |source: DomainError| CatalogError::InvalidRoute {
        id: route_id.to_string(),
        source,
    };
    let station = registry.resolve(&record.station)?;
    let arrival = TimeOfDay::parse(&record.arrival).map_err(|e| invalid(e.into()))?;
    let departure = TimeOfDay::parse(&record.departure).map_err(|e| invalid(e.into()))?;
    Stop::new(station, arrival, departure).map_err(invalid)
}

fn alternate_from_record(record: &AlternateRouteRecord) -> Result<AlternateRoute, DomainError> {
    AlternateRoute::new(
        record.nearest_station.clone(),
        record.distance,
        record.train_name.clone(),
        TimeOfDay::parse(&record.departure)?,
        TimeOfDay::parse(&record.arrival)?,
    )
}
