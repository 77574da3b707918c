//! Sort keys for route listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?}: expected price, duration or departure")]
pub struct InvalidSortKey(String);

/// What to order a route listing by. Every key sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Price, SortKey::Duration, SortKey::Departure];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Departure => "departure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Price => "Price",
            SortKey::Duration => "Duration",
            SortKey::Departure => "Departure Time",
        }
    }

    /// Compare two routes by this key.
    ///
    /// Duration and departure compare minute counts, never formatted strings.
    pub fn compare(&self, a: &Route, b: &Route) -> Ordering {
        match self {
            SortKey::Price => a.price().value().total_cmp(&b.price().value()),
            SortKey::Duration => a
                .duration()
                .total_minutes()
                .cmp(&b.duration().total_minutes()),
            SortKey::Departure => a
                .departure()
                .minutes_since_midnight()
                .cmp(&b.departure().minutes_since_midnight()),
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "duration" => Ok(SortKey::Duration),
            "departure" => Ok(SortKey::Departure),
            _ => Err(InvalidSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
