//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::StationRegistry;
use crate::domain::{AlternateRoute, Route, RouteType, ServiceStatus, StationCode, Stop};
use crate::query::{LineStyle, RouteGeometry, SortKey};

/// Query string for the landing page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexRequest {
    /// Passenger count to show (clamped)
    pub passengers: Option<u32>,

    /// Origin text to pre-fill
    pub from: Option<String>,

    /// Destination text to pre-fill
    pub to: Option<String>,

    /// Journey type to pre-select
    pub journey_type: Option<String>,
}

/// Query string for the listing page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingRequest {
    /// Free-text filter
    pub q: Option<String>,

    /// Sort key: price, duration or departure
    pub sort: Option<String>,

    /// Id of the route to show on the map
    pub selected: Option<String>,

    /// Origin as typed on the landing page
    pub from: Option<String>,

    /// Destination as typed on the landing page
    pub to: Option<String>,

    /// Passenger count (clamped)
    pub passengers: Option<u32>,

    /// One-way, round-trip or multi-city
    pub journey_type: Option<String>,
}

/// Query string for the route list API.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesRequest {
    /// Free-text filter
    pub q: Option<String>,

    /// Sort key: price, duration or departure
    pub sort: Option<String>,
}

/// A station reference in API output.
#[derive(Debug, Serialize)]
pub struct StationRef {
    /// Station code
    pub code: String,

    /// Station name
    pub name: String,
}

/// An intermediate stop in API output.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub station: StationRef,
    pub arrival: String,
    pub departure: String,
}

/// An advisory alternate route in API output.
#[derive(Debug, Serialize)]
pub struct AlternateRouteResult {
    pub nearest_station: String,
    pub distance_km: f64,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

/// A route in API output.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Route id
    pub id: String,

    /// Service name
    pub name: String,

    /// Origin station
    pub from: StationRef,

    /// Destination station
    pub to: StationRef,

    /// Departure time (HH:MM)
    pub departure: String,

    /// Arrival time (HH:MM)
    pub arrival: String,

    /// Formatted duration, e.g. "8h 15m"
    pub duration: String,

    /// Duration in minutes
    pub duration_mins: u16,

    /// Ticket price
    pub price: f64,

    /// DIRECT or INDIRECT
    #[serde(rename = "type")]
    pub route_type: RouteType,

    /// Intermediate stops (empty for direct routes)
    pub stops: Vec<StopResult>,

    /// Suggested alternative from a nearby station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_route: Option<AlternateRouteResult>,

    /// Running status
    pub status: ServiceStatus,
}

/// Response for the route list API.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    /// Text the routes were filtered by
    pub query: String,

    /// Key the routes are ordered by
    pub sort: SortKey,

    /// Matching routes, in order
    pub routes: Vec<RouteResult>,
}

/// A map point in API output.
#[derive(Debug, Serialize)]
pub struct PointResult {
    pub code: String,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response for the route geometry API, also embedded in the listing page.
#[derive(Debug, Serialize)]
pub struct GeometryResponse {
    /// Route the geometry belongs to
    pub route_id: String,

    /// solid (direct) or dashed (indirect)
    pub style: LineStyle,

    /// Points in travel order
    pub points: Vec<PointResult>,

    /// [lat, lon] to centre the map on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
}

/// Request to search stations.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search query (code or name)
    pub q: String,

    /// Maximum results (default 10, max 50)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationRef {
    /// Resolve a code against the registry, falling back to the bare code.
    pub fn resolve(code: StationCode, registry: &StationRegistry) -> Self {
        Self {
            code: code.to_string(),
            name: registry
                .name_of(&code)
                .map_or_else(|| code.to_string(), str::to_string),
        }
    }
}

impl StopResult {
    fn from_stop(stop: &Stop, registry: &StationRegistry) -> Self {
        Self {
            station: StationRef::resolve(stop.station(), registry),
            arrival: stop.arrival().to_string(),
            departure: stop.departure().to_string(),
        }
    }
}

impl AlternateRouteResult {
    fn from_alternate(alt: &AlternateRoute) -> Self {
        Self {
            nearest_station: alt.nearest_station.clone(),
            distance_km: alt.distance_km(),
            train_name: alt.train_name.clone(),
            departure: alt.departure.to_string(),
            arrival: alt.arrival.to_string(),
            duration: alt.duration().to_string(),
        }
    }
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route, registry: &StationRegistry) -> Self {
        let duration = route.duration();
        Self {
            id: route.id().to_string(),
            name: route.name().to_string(),
            from: StationRef::resolve(route.from(), registry),
            to: StationRef::resolve(route.to(), registry),
            departure: route.departure().to_string(),
            arrival: route.arrival().to_string(),
            duration: duration.to_string(),
            duration_mins: duration.total_minutes(),
            price: route.price().value(),
            route_type: route.route_type(),
            stops: route
                .stops()
                .iter()
                .map(|s| StopResult::from_stop(s, registry))
                .collect(),
            alternate_route: route
                .alternate_route()
                .map(AlternateRouteResult::from_alternate),
            status: route.status(),
        }
    }
}

impl GeometryResponse {
    /// Create from a resolved geometry.
    pub fn from_geometry(route: &Route, geometry: &RouteGeometry) -> Self {
        Self {
            route_id: route.id().to_string(),
            style: geometry.style,
            points: geometry
                .points
                .iter()
                .map(|p| PointResult {
                    code: p.code.to_string(),
                    label: p.label.clone(),
                    lat: p.coordinates.latitude(),
                    lon: p.coordinates.longitude(),
                })
                .collect(),
            center: geometry.bounds().map(|b| {
                let (lat, lon) = b.center();
                [lat, lon]
            }),
        }
    }
}
