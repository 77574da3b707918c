//! Map geometry for a route.
//!
//! The map widget draws a line through these points in order and puts a
//! labelled marker on each one. Rendering itself happens client-side.

use serde::Serialize;

use crate::catalog::{CatalogError, StationRegistry};
use crate::domain::{Coordinates, Route, RouteType, StationCode};

/// How the route line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn for_type(route_type: RouteType) -> Self {
        match route_type {
            RouteType::Direct => LineStyle::Solid,
            RouteType::Indirect => LineStyle::Dashed,
        }
    }
}

/// One marker on the route line.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryPoint {
    pub code: StationCode,
    pub label: String,
    pub coordinates: Coordinates,
}

/// Bounding box of a geometry, for centring the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// Ordered points `[origin, stops.., destination]` plus a line style.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub points: Vec<GeometryPoint>,
    pub style: LineStyle,
}

impl RouteGeometry {
    /// Resolve every station on the route to a labelled point.
    ///
    /// Routes from a validated catalog always resolve; `NotFound` only
    /// arises when a route is paired with a registry it was not checked
    /// against.
    pub fn for_route(route: &Route, registry: &StationRegistry) -> Result<Self, CatalogError> {
        let points = route
            .path()
            .map(|code| {
                let station = registry.lookup(&code)?;
                Ok(GeometryPoint {
                    code,
                    label: station.name.clone(),
                    coordinates: station.coordinates,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            points,
            style: LineStyle::for_type(route.route_type()),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?.coordinates;
        let init = Bounds {
            south: first.latitude(),
            west: first.longitude(),
            north: first.latitude(),
            east: first.longitude(),
        };
        Some(self.points.iter().fold(init, |b, p| Bounds {
            south: b.south.min(p.coordinates.latitude()),
            west: b.west.min(p.coordinates.longitude()),
            north: b.north.max(p.coordinates.latitude()),
            east: b.east.max(p.coordinates.longitude()),
        }))
    }
}
