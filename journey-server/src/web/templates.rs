//! Askama templates for the web frontend.

use askama::Template;

use crate::catalog::StationRegistry;
use crate::domain::{AlternateRoute, Route, RouteKind, ServiceStatus, Stop};
use crate::query::{JourneyType, PassengerCount, SearchForm, Selection, SortKey};

use super::links::{ListingLink, index_href};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Landing page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub from_text: String,
    pub to_text: String,
    pub journey_types: Vec<OptionView>,
    pub passengers: PassengerView,
    pub popular: Vec<PopularRouteView>,
}

/// Route listing with the map panel.
#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    /// Catalog not published yet
    pub loading: bool,
    pub query: String,
    pub from_text: String,
    pub to_text: String,
    pub journey_type: JourneyType,
    pub sort: SortKey,
    pub sort_options: Vec<OptionView>,
    pub routes: Vec<RouteView>,
    pub selected: Option<RouteView>,
    /// Geometry of the selected route, serialized for the map script
    pub geometry_json: Option<String>,
    pub passengers: PassengerView,
    pub back_href: String,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A choice in a radio group or sort bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Passenger counter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerView {
    pub count: u8,
    pub label: String,
    pub increment_href: Option<String>,
    pub decrement_href: Option<String>,
}

impl PassengerView {
    /// Counter for `form`; the +/- links keep the rest of the form.
    pub fn new(form: &SearchForm) -> Self {
        let passengers = form.passengers;
        let href = |passengers| {
            index_href(&SearchForm {
                passengers,
                ..form.clone()
            })
        };
        Self {
            count: passengers.get(),
            label: passengers.to_string(),
            increment_href: passengers
                .can_increment()
                .then(|| href(passengers.increment())),
            decrement_href: passengers
                .can_decrement()
                .then(|| href(passengers.decrement())),
        }
    }
}

/// A card in the popular routes section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularRouteView {
    pub name: String,
    pub description: String,
    pub href: String,
}

/// Popular routes shown on the landing page: (title, blurb, listing query).
const POPULAR_ROUTES: [(&str, &str, &str); 3] = [
    ("Coimbatore to Chennai", "Overnight and daytime expresses", "Chennai"),
    ("Tiruchirappalli to Chennai", "The Cholan via the delta", "Cholan"),
    ("Mayiladuthurai to Tiruchirappalli", "A short hop inland", "Mayiladuthurai"),
];

impl PopularRouteView {
    pub fn all(passengers: PassengerCount) -> Vec<Self> {
        POPULAR_ROUTES
            .iter()
            .map(|&(name, description, query)| Self {
                name: name.to_string(),
                description: description.to_string(),
                href: ListingLink::for_query(query, passengers).href(),
            })
            .collect()
    }
}

/// An intermediate stop for display.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub layover: String,
}

impl StopView {
    fn from_stop(stop: &Stop, registry: &StationRegistry) -> Self {
        Self {
            name: display_name(stop.station().as_str(), registry.name_of(&stop.station())),
            arrival: stop.arrival().to_string(),
            departure: stop.departure().to_string(),
            layover: stop.layover().to_string(),
        }
    }
}

/// Alternate route advisory for display.
#[derive(Debug, Clone)]
pub struct AlternateRouteView {
    pub nearest_station: String,
    pub distance: String,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
}

impl AlternateRouteView {
    fn from_alternate(alt: &AlternateRoute) -> Self {
        Self {
            nearest_station: alt.nearest_station.clone(),
            distance: format!("{} km", alt.distance_km()),
            train_name: alt.train_name.clone(),
            departure: alt.departure.to_string(),
            arrival: alt.arrival.to_string(),
            duration: alt.duration().to_string(),
        }
    }
}

/// Route card view model.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: String,
    pub name: String,
    pub from_name: String,
    pub to_name: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub price: String,
    pub is_direct: bool,
    pub stops: Vec<StopView>,
    pub alternate: Option<AlternateRouteView>,
    pub status: ServiceStatus,
    pub is_selected: bool,
    pub select_href: String,
}

impl RouteView {
    /// Create from a domain Route.
    pub fn from_route(
        route: &Route,
        registry: &StationRegistry,
        selection: &Selection,
        link: &ListingLink<'_>,
    ) -> Self {
        let name_of = |code: crate::domain::StationCode| {
            display_name(code.as_str(), registry.name_of(&code))
        };
        let (is_direct, stops) = match route.kind() {
            RouteKind::Direct => (true, Vec::new()),
            RouteKind::Indirect(stops) => (
                false,
                stops
                    .iter()
                    .map(|s| StopView::from_stop(s, registry))
                    .collect(),
            ),
        };
        Self {
            id: route.id().to_string(),
            name: route.name().to_string(),
            from_name: name_of(route.from()),
            to_name: name_of(route.to()),
            departure: route.departure().to_string(),
            arrival: route.arrival().to_string(),
            duration: route.duration().to_string(),
            price: route.price().to_string(),
            is_direct,
            stops,
            alternate: route
                .alternate_route()
                .map(AlternateRouteView::from_alternate),
            status: route.status(),
            is_selected: selection.is_selected(route),
            select_href: link.with_selected(route.id().as_str()).href(),
        }
    }

    /// "Direct" or "Indirect".
    pub fn type_label(&self) -> &'static str {
        if self.is_direct { "Direct" } else { "Indirect" }
    }

    pub fn status_label(&self) -> String {
        self.status.to_string()
    }

    /// CSS modifier for the status badge.
    pub fn status_class(&self) -> &'static str {
        match self.status {
            ServiceStatus::OnTime => "on-time",
            ServiceStatus::Delayed => "delayed",
            ServiceStatus::Cancelled => "cancelled",
        }
    }

    /// "via Ariyalur, Mayiladuthurai" for indirect routes.
    pub fn via_summary(&self) -> String {
        if self.stops.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.stops.iter().map(|s| s.name.as_str()).collect();
        format!("via {}", names.join(", "))
    }
}

fn display_name(code: &str, name: Option<&str>) -> String {
    name.map_or_else(|| code.to_string(), str::to_string)
}

// ============================================================================
// Builders
// ============================================================================

impl IndexTemplate {
    /// Landing page prefilled from `form`.
    pub fn new(form: &SearchForm) -> Self {
        let journey_types = JourneyType::ALL
            .into_iter()
            .map(|t| OptionView {
                value: t.as_str().to_string(),
                label: t.label().to_string(),
                href: String::new(),
                active: t == form.journey_type,
            })
            .collect();

        Self {
            from_text: form.from_text.clone(),
            to_text: form.to_text.clone(),
            journey_types,
            passengers: PassengerView::new(form),
            popular: PopularRouteView::all(form.passengers),
        }
    }
}

impl ListingTemplate {
    /// Page shown while the catalog has not been published.
    pub fn loading(form: &SearchForm) -> Self {
        let link = ListingLink::for_form(form);
        Self {
            loading: true,
            query: link.query.to_string(),
            from_text: form.from_text.clone(),
            to_text: form.to_text.clone(),
            journey_type: form.journey_type,
            sort: form.sort,
            sort_options: sort_options(&link),
            routes: Vec::new(),
            selected: None,
            geometry_json: None,
            passengers: PassengerView::new(form),
            back_href: index_href(form),
        }
    }

    /// "Round Trip from Coimbatore to Chennai", or nothing when the
    /// landing page fields were left blank.
    pub fn trip_summary(&self) -> String {
        let mut summary = String::new();
        if !self.from_text.trim().is_empty() {
            summary.push_str(&format!(" from {}", self.from_text.trim()));
        }
        if !self.to_text.trim().is_empty() {
            summary.push_str(&format!(" to {}", self.to_text.trim()));
        }
        if summary.is_empty() {
            return summary;
        }
        format!("{}{summary}", self.journey_type.label())
    }
}

/// One option per sort key, linking to the same listing re-sorted.
pub fn sort_options(link: &ListingLink<'_>) -> Vec<OptionView> {
    SortKey::ALL
        .into_iter()
        .map(|key| OptionView {
            value: key.as_str().to_string(),
            label: key.label().to_string(),
            href: link.with_sort(key).href(),
            active: key == link.sort,
        })
        .collect()
}
