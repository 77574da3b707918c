//! Station registry: code → station lookup.

use std::collections::HashMap;

use crate::domain::{Coordinates, DomainError, Station, StationCode};

use super::error::CatalogError;
use super::records::StationRecord;

/// Fixed mapping from station code to station.
///
/// Built once when the catalog loads and never mutated afterwards.
/// Iteration follows the order stations were supplied in.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
    index: HashMap<StationCode, usize>,
}

impl StationRegistry {
    /// Build a registry from validated stations, rejecting duplicate codes.
    pub fn new(stations: Vec<Station>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if index.insert(station.code, i).is_some() {
                return Err(CatalogError::DuplicateStation(station.code));
            }
        }
        Ok(Self { stations, index })
    }

    /// Build a registry from raw records.
    pub fn from_records(records: &[StationRecord]) -> Result<Self, CatalogError> {
        let stations = records
            .iter()
            .map(station_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stations)
    }

    /// Look up a station by code.
    pub fn lookup(&self, code: &StationCode) -> Result<&Station, CatalogError> {
        self.get(code).ok_or_else(|| CatalogError::NotFound {
            code: code.to_string(),
        })
    }

    /// Resolve a raw code string to a known station code.
    ///
    /// A malformed code cannot be a key, so it is reported as `NotFound` too.
    pub fn resolve(&self, raw: &str) -> Result<StationCode, CatalogError> {
        StationCode::parse(raw)
            .ok()
            .filter(|code| self.index.contains_key(code))
            .ok_or_else(|| CatalogError::NotFound {
                code: raw.to_string(),
            })
    }

    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.index.get(code).map(|&i| &self.stations[i])
    }

    /// Display name for a station code.
    pub fn name_of(&self, code: &StationCode) -> Option<&str> {
        self.get(code).map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Search stations by code or name (case-insensitive).
    ///
    /// Exact code matches come first, then code prefix matches, then name
    /// substring matches, each group in registry order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Station> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let exact = StationCode::parse_normalized(query).ok();

        let mut ranked: Vec<(u8, &Station)> = self
            .stations
            .iter()
            .filter_map(|station| {
                let code = station.code.as_str().to_lowercase();
                let rank = if exact == Some(station.code) {
                    0
                } else if code.starts_with(&needle) {
                    1
                } else if station.name.to_lowercase().contains(&needle) {
                    2
                } else {
                    return None;
                };
                Some((rank, station))
            })
            .collect();

        // Stable: ties keep registry order
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().take(limit).map(|(_, s)| s).collect()
    }
}

fn station_from_record(record: &StationRecord) -> Result<Station, CatalogError> {
    let invalid = |source: DomainError| CatalogError::InvalidStation {
        code: record.code.clone(),
        source,
    };
    let code = StationCode::parse(&record.code).map_err(|e| invalid(e.into()))?;
    let coordinates = Coordinates::new(record.latitude, record.longitude).map_err(invalid)?;
    Ok(Station::new(code, record.name.clone(), coordinates))
}
