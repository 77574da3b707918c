//! Route filtering and ordering.
//!
//! The engine is a pure function of its inputs: a set of routes, the station
//! registry used to resolve names, a free-text query and a sort key. It never
//! mutates the catalog and keeps no state between calls.

use tracing::debug;

use crate::catalog::{RouteCatalog, StationRegistry};
use crate::domain::Route;

use super::sort::SortKey;

/// A free-text filter plus a sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pub text: String,
    pub sort: SortKey,
}

impl RouteQuery {
    pub fn new(text: impl Into<String>, sort: SortKey) -> Self {
        Self {
            text: text.into(),
            sort,
        }
    }

    /// Filter then stably sort `routes`.
    pub fn apply<'a, I>(&self, registry: &StationRegistry, routes: I) -> Vec<&'a Route>
    where
        I: IntoIterator<Item = &'a Route>,
    {
        sort_routes(filter_routes(registry, routes, &self.text), self.sort)
    }
}

/// Run a query against the whole catalog.
///
/// ```
/// use journey_server::catalog::sample_catalog;
/// use journey_server::query::{RouteQuery, SortKey, query};
///
/// let catalog = sample_catalog().unwrap();
/// let found = query(&catalog, &RouteQuery::new("chennai", SortKey::Price));
/// assert!(found.iter().all(|r| r.to().as_str() == "MAS" || r.name().contains("Chennai")));
/// ```
pub fn query<'a>(catalog: &'a RouteCatalog, request: &RouteQuery) -> Vec<&'a Route> {
    let results = request.apply(catalog.registry(), catalog.routes());
    debug!(
        text = %request.text,
        sort = %request.sort,
        matched = results.len(),
        total = catalog.len(),
        "route query"
    );
    results
}

/// Keep routes whose origin name, destination name or own name contains
/// `text`, ignoring case. Empty text keeps everything. Input order is kept.
pub fn filter_routes<'a, I>(registry: &StationRegistry, routes: I, text: &str) -> Vec<&'a Route>
where
    I: IntoIterator<Item = &'a Route>,
{
    let needle = text.to_lowercase();
    routes
        .into_iter()
        .filter(|route| matches_text(registry, route, &needle))
        .collect()
}

/// Stable ascending sort; equal keys keep their incoming order.
pub fn sort_routes(mut routes: Vec<&Route>, key: SortKey) -> Vec<&Route> {
    routes.sort_by(|a, b| key.compare(a, b));
    routes
}

/// `needle` must already be lowercase.
fn matches_text(registry: &StationRegistry, route: &Route, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    registry.name_of(&route.from()).is_some_and(contains)
        || registry.name_of(&route.to()).is_some_and(contains)
        || contains(route.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    fn ids(routes: &[&Route]) -> Vec<String> {
        routes.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn empty_text_keeps_everything_in_sorted_order() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("", SortKey::Price));
        assert_eq!(results.len(), catalog.len());
    }

    #[test]
    fn filter_chennai_matches_endpoints_and_name() {
        let catalog = sample_catalog().unwrap();
        let results = filter_routes(catalog.registry(), catalog.routes(), "chennai");

        // 1-3 end at MAS; 4 runs CBE-ALU but is called "MAQ Chennai Express"
        assert_eq!(ids(&results), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let catalog = sample_catalog().unwrap();
        let lower = filter_routes(catalog.registry(), catalog.routes(), "coimbatore");
        let upper = filter_routes(catalog.registry(), catalog.routes(), "COIMBATORE");
        assert_eq!(ids(&lower), ids(&upper));
        assert_eq!(ids(&lower), vec!["1", "2", "4", "6"]);
    }

    #[test]
    fn filter_matches_route_name() {
        let catalog = sample_catalog().unwrap();
        let results = filter_routes(catalog.registry(), catalog.routes(), "vaigai");
        assert_eq!(ids(&results), vec!["6"]);
    }

    #[test]
    fn filter_does_not_match_codes() {
        let catalog = sample_catalog().unwrap();
        // "TPJ" is a code, not part of any name
        let results = filter_routes(catalog.registry(), catalog.routes(), "tpj");
        assert!(results.is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("mumbai", SortKey::Duration));
        assert!(results.is_empty());
    }

    #[test]
    fn sort_by_price_is_stable() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("", SortKey::Price));
        // 1 and 5 both cost 450; catalog order decides
        assert_eq!(ids(&results), vec!["6", "3", "1", "5", "2", "4"]);
    }

    #[test]
    fn sort_by_duration_uses_minutes() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("", SortKey::Duration));
        // 1 and 4 both take 8h 15m; catalog order decides
        assert_eq!(ids(&results), vec!["6", "5", "3", "2", "1", "4"]);
    }

    #[test]
    fn sort_by_duration_handles_double_digit_hours() {
        use crate::catalog::{CatalogRecords, RouteRecord, StationRecord};
        use crate::domain::{RouteType, ServiceStatus};

        let station = |code: &str, name: &str| StationRecord {
            code: code.to_string(),
            name: name.to_string(),
            latitude: 11.0,
            longitude: 78.0,
        };
        let route = |id: &str, departure: &str, arrival: &str| RouteRecord {
            id: id.to_string(),
            name: format!("Service {id}"),
            from: "CBE".to_string(),
            to: "MAS".to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            price: 100.0,
            route_type: RouteType::Direct,
            stops: None,
            alternate_route: None,
            status: ServiceStatus::OnTime,
        };
        let catalog = RouteCatalog::load(CatalogRecords {
            stations: vec![station("CBE", "Coimbatore"), station("MAS", "Chennai")],
            routes: vec![
                route("ten", "08:00", "18:00"),
                route("overnight", "22:00", "09:30"),
                route("nine", "08:00", "17:00"),
                route("one", "06:00", "07:00"),
            ],
        })
        .unwrap();

        let results = query(&catalog, &RouteQuery::new("", SortKey::Duration));
        let durations: Vec<_> = results.iter().map(|r| r.duration().to_string()).collect();

        // As strings "10h 0m" < "11h 30m" < "1h 0m" < "9h 0m"
        assert_eq!(ids(&results), vec!["one", "nine", "ten", "overnight"]);
        assert_eq!(durations, vec!["1h 0m", "9h 0m", "10h 0m", "11h 30m"]);
    }

    #[test]
    fn sort_by_departure() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("", SortKey::Departure));
        assert_eq!(ids(&results), vec!["4", "5", "2", "3", "6", "1"]);
    }

    #[test]
    fn filter_then_sort() {
        let catalog = sample_catalog().unwrap();
        let results = query(&catalog, &RouteQuery::new("chennai", SortKey::Duration));
        assert_eq!(ids(&results), vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn reapplying_empty_filter_is_identity() {
        let catalog = sample_catalog().unwrap();
        let q = RouteQuery::new("express", SortKey::Departure);
        let first = query(&catalog, &q);
        let again =
            RouteQuery::new("", SortKey::Departure).apply(catalog.registry(), first.clone());
        assert_eq!(ids(&first), ids(&again));
    }

    #[test]
    fn catalog_is_untouched() {
        let catalog = sample_catalog().unwrap();
        let before = ids(&catalog.routes().iter().collect::<Vec<_>>());
        let _ = query(&catalog, &RouteQuery::new("", SortKey::Duration));
        let after = ids(&catalog.routes().iter().collect::<Vec<_>>());
        assert_eq!(before, after);
    }
}
