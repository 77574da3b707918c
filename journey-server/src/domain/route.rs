//! Train routes: direct services and services with intermediate stops.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StationCode, TimeOfDay, TripDuration};

/// Opaque route identifier, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ticket price. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidPrice(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A scheduled halt between a route's origin and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    station: StationCode,
    arrival: TimeOfDay,
    departure: TimeOfDay,
}

impl Stop {
    /// Create a stop. The train may not leave before it arrives.
    pub fn new(
        station: StationCode,
        arrival: TimeOfDay,
        departure: TimeOfDay,
    ) -> Result<Self, DomainError> {
        if departure < arrival {
            return Err(DomainError::InvalidStop {
                station,
                arrival: arrival.to_string(),
                departure: departure.to_string(),
            });
        }
        Ok(Self {
            station,
            arrival,
            departure,
        })
    }

    pub fn station(&self) -> StationCode {
        self.station
    }

    pub fn arrival(&self) -> TimeOfDay {
        self.arrival
    }

    pub fn departure(&self) -> TimeOfDay {
        self.departure
    }

    /// Time spent standing at the stop.
    pub fn layover(&self) -> TripDuration {
        TripDuration::between(self.arrival, self.departure)
    }
}

/// The ordered, non-empty stop list of an indirect route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stops(Vec<Stop>);

impl Stops {
    pub fn new(stops: Vec<Stop>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::EmptyStops);
        }
        Ok(Self(stops))
    }

    pub fn as_slice(&self) -> &[Stop] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Stops {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a route runs straight through or via intermediate stops.
///
/// The stop list only exists on the indirect variant, so a direct route
/// can never carry stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Direct,
    Indirect(Stops),
}

impl RouteKind {
    pub fn route_type(&self) -> RouteType {
        match self {
            RouteKind::Direct => RouteType::Direct,
            RouteKind::Indirect(_) => RouteType::Indirect,
        }
    }

    /// Intermediate stops; empty for direct routes.
    pub fn stops(&self) -> &[Stop] {
        match self {
            RouteKind::Direct => &[],
            RouteKind::Indirect(stops) => stops.as_slice(),
        }
    }
}

/// The flat `DIRECT`/`INDIRECT` label used in catalog records and the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteType {
    Direct,
    Indirect,
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteType::Direct => f.write_str("Direct"),
            RouteType::Indirect => f.write_str("Indirect"),
        }
    }
}

/// Running status shown next to a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    OnTime,
    Delayed,
    Cancelled,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::OnTime => f.write_str("On Time"),
            ServiceStatus::Delayed => f.write_str("Delayed"),
            ServiceStatus::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A suggested service from a nearby station.
///
/// Purely advisory: the station is free text, not a registry reference.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateRoute {
    pub nearest_station: String,
    distance_km: f64,
    pub train_name: String,
    pub departure: TimeOfDay,
    pub arrival: TimeOfDay,
}

impl AlternateRoute {
    pub fn new(
        nearest_station: impl Into<String>,
        distance_km: f64,
        train_name: impl Into<String>,
        departure: TimeOfDay,
        arrival: TimeOfDay,
    ) -> Result<Self, DomainError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::InvalidDistance(distance_km));
        }
        Ok(Self {
            nearest_station: nearest_station.into(),
            distance_km,
            train_name: train_name.into(),
            departure,
            arrival,
        })
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration(&self) -> TripDuration {
        TripDuration::between(self.departure, self.arrival)
    }
}

/// A bookable train service between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    id: RouteId,
    name: String,
    from: StationCode,
    to: StationCode,
    departure: TimeOfDay,
    arrival: TimeOfDay,
    price: Price,
    kind: RouteKind,
    alternate_route: Option<AlternateRoute>,
    status: ServiceStatus,
}

impl Route {
    /// Create a route.
    ///
    /// Fails if origin and destination are the same station.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        from: StationCode,
        to: StationCode,
        departure: TimeOfDay,
        arrival: TimeOfDay,
        price: Price,
        kind: RouteKind,
    ) -> Result<Self, DomainError> {
        if from == to {
            return Err(DomainError::SameEndpoints(from));
        }
        Ok(Self {
            id,
            name: name.into(),
            from,
            to,
            departure,
            arrival,
            price,
            kind,
            alternate_route: None,
            status: ServiceStatus::default(),
        })
    }

    pub fn with_alternate_route(mut self, alternate: AlternateRoute) -> Self {
        self.alternate_route = Some(alternate);
        self
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> StationCode {
        self.from
    }

    pub fn to(&self) -> StationCode {
        self.to
    }

    pub fn departure(&self) -> TimeOfDay {
        self.departure
    }

    pub fn arrival(&self) -> TimeOfDay {
        self.arrival
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn route_type(&self) -> RouteType {
        self.kind.route_type()
    }

    pub fn stops(&self) -> &[Stop] {
        self.kind.stops()
    }

    pub fn alternate_route(&self) -> Option<&AlternateRoute> {
        self.alternate_route.as_ref()
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    /// Derived trip duration. Recomputed on every call.
    pub fn duration(&self) -> TripDuration {
        TripDuration::between(self.departure, self.arrival)
    }

    /// Every station the route touches, in travel order: origin, stops, destination.
    pub fn path(&self) -> impl Iterator<Item = StationCode> + '_ {
        std::iter::once(self.from)
            .chain(self.stops().iter().map(Stop::station))
            .chain(std::iter::once(self.to))
    }
}
