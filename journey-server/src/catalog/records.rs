//! Raw catalog records.
//!
//! These mirror the JSON shape of the embedded catalog (and of catalog files
//! supplied at startup) one-to-one. Nothing here is validated; conversion to
//! domain types happens in [`super::RouteCatalog::load`].

use serde::{Deserialize, Serialize};

use crate::domain::{RouteType, ServiceStatus};

/// Top-level catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecords {
    pub stations: Vec<StationRecord>,
    pub routes: Vec<RouteRecord>,
}

/// A station entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A route entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub id: String,
    pub name: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub price: f64,

    #[serde(rename = "type")]
    pub route_type: RouteType,

    /// Present only for indirect routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<StopRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_route: Option<AlternateRouteRecord>,

    #[serde(default)]
    pub status: ServiceStatus,
}

/// An intermediate stop entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub station: String,
    pub arrival: String,
    pub departure: String,
}

/// An advisory alternate-route entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateRouteRecord {
    pub nearest_station: String,
    pub distance: f64,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
}
