//! Search form input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::engine::RouteQuery;
use super::sort::SortKey;

/// Fewest passengers a booking can be for.
pub const MIN_PASSENGERS: u8 = 1;

/// Most passengers a single booking can be for.
pub const MAX_PASSENGERS: u8 = 9;

/// Number of travellers, always within `MIN_PASSENGERS..=MAX_PASSENGERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerCount(u8);

impl PassengerCount {
    /// Clamp any requested count into range.
    pub fn clamped(n: u32) -> Self {
        let n = n.clamp(u32::from(MIN_PASSENGERS), u32::from(MAX_PASSENGERS));
        Self(n as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// One more passenger, saturating at the maximum.
    pub fn increment(self) -> Self {
        Self::clamped(u32::from(self.0) + 1)
    }

    /// One fewer passenger, saturating at the minimum.
    pub fn decrement(self) -> Self {
        Self::clamped(u32::from(self.0).saturating_sub(1))
    }

    pub fn can_increment(&self) -> bool {
        self.0 < MAX_PASSENGERS
    }

    pub fn can_decrement(&self) -> bool {
        self.0 > MIN_PASSENGERS
    }

    /// "Passenger" or "Passengers".
    pub fn noun(&self) -> &'static str {
        if self.0 == 1 { "Passenger" } else { "Passengers" }
    }
}

impl Default for PassengerCount {
    fn default() -> Self {
        Self(MIN_PASSENGERS)
    }
}

impl fmt::Display for PassengerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.noun())
    }
}

/// Error returned when parsing an unknown journey type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown journey type {0:?}")]
pub struct InvalidJourneyType(String);

/// Kind of trip the traveller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyType {
    #[default]
    OneWay,
    RoundTrip,
    MultiCity,
}

impl JourneyType {
    pub const ALL: [JourneyType; 3] = [
        JourneyType::OneWay,
        JourneyType::RoundTrip,
        JourneyType::MultiCity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyType::OneWay => "one-way",
            JourneyType::RoundTrip => "round-trip",
            JourneyType::MultiCity => "multi-city",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JourneyType::OneWay => "One Way",
            JourneyType::RoundTrip => "Round Trip",
            JourneyType::MultiCity => "Multi-City",
        }
    }
}

impl FromStr for JourneyType {
    type Err = InvalidJourneyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JourneyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidJourneyType(s.to_string()))
    }
}

/// Everything the search form submits.
///
/// There is a single filter predicate: the free-text `query`. `from_text`
/// and `to_text` are echoed back unvalidated and only stand in for the query
/// when it is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub from_text: String,
    pub to_text: String,
    pub sort: SortKey,
    pub query: String,
    pub journey_type: JourneyType,
    pub passengers: PassengerCount,
}

impl SearchForm {
    /// The query the engine runs for this form.
    pub fn route_query(&self) -> RouteQuery {
        RouteQuery::new(self.effective_query(), self.sort)
    }

    /// The free-text query, trimmed.
    ///
    /// Falls back to the destination, then the origin, when the user only
    /// filled in the from/to fields on the landing page.
    pub fn effective_query(&self) -> &str {
        [&self.query, &self.to_text, &self.from_text]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any sequence of button presses stays in range
        #[test]
        fn presses_stay_in_range(
            start in 0u32..20,
            presses in prop::collection::vec(any::<bool>(), 0..30),
        ) {
            let mut count = PassengerCount::clamped(start);
            for up in presses {
                count = if up { count.increment() } else { count.decrement() };
                prop_assert!((MIN_PASSENGERS..=MAX_PASSENGERS).contains(&count.get()));
            }
        }
    }
}
