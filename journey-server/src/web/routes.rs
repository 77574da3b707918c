//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::catalog::{CatalogError, RouteCatalog};
use crate::domain::RouteId;
use crate::query::{
    JourneyType, PassengerCount, RouteGeometry, SearchForm, Selection, SortKey, query,
};

use super::dto::*;
use super::links::{ListingLink, index_href};
use super::state::AppState;
use super::templates::*;

/// Default number of station search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on station search results.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<std::path::Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/listing", get(listing_page))
        .route("/api/routes", get(list_routes))
        .route("/api/routes/:id/geometry", get(route_geometry))
        .route("/api/stations/search", get(search_stations))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found_page)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Landing page with the search form.
async fn index_page(Query(req): Query<IndexRequest>) -> Result<Html<String>, AppError> {
    let form = SearchForm {
        from_text: req.from.unwrap_or_default(),
        to_text: req.to.unwrap_or_default(),
        journey_type: parse_journey_type(req.journey_type.as_deref())?,
        passengers: PassengerCount::clamped(req.passengers.unwrap_or(1)),
        ..Default::default()
    };

    render(IndexTemplate::new(&form))
}

/// Route listing with the selected route on the map.
async fn listing_page(
    State(state): State<AppState>,
    Query(req): Query<ListingRequest>,
) -> Result<Html<String>, AppError> {
    let form = SearchForm {
        from_text: req.from.unwrap_or_default(),
        to_text: req.to.unwrap_or_default(),
        sort: parse_sort(req.sort.as_deref())?,
        query: req.q.unwrap_or_default(),
        journey_type: parse_journey_type(req.journey_type.as_deref())?,
        passengers: PassengerCount::clamped(req.passengers.unwrap_or(1)),
    };

    let Some(catalog) = state.catalog.get().await else {
        return render(ListingTemplate::loading(&form));
    };

    let mut selection = Selection::initial(&catalog);
    if let Some(id) = req.selected.as_deref().filter(|id| !id.is_empty()) {
        if let Err(e) = selection.select_id(&catalog, id) {
            warn!(error = %e, "ignoring unknown selection");
        }
    }

    render(listing_template(&catalog, &form, &selection)?)
}

fn listing_template(
    catalog: &RouteCatalog,
    form: &SearchForm,
    selection: &Selection,
) -> Result<ListingTemplate, AppError> {
    let request = form.route_query();
    let registry = catalog.registry();
    let link = ListingLink {
        selected: selection.id().map(RouteId::as_str),
        ..ListingLink::for_form(form)
    };

    let routes = query(catalog, &request)
        .into_iter()
        .map(|route| RouteView::from_route(route, registry, selection, &link))
        .collect();

    let selected_route = selection.route(catalog);
    let geometry_json = selected_route
        .map(|route| -> Result<String, AppError> {
            let geometry = RouteGeometry::for_route(route, registry)?;
            let response = GeometryResponse::from_geometry(route, &geometry);
            serde_json::to_string(&response).map_err(|e| AppError::Internal {
                message: format!("Geometry encoding failed: {e}"),
            })
        })
        .transpose()?;

    Ok(ListingTemplate {
        loading: false,
        query: request.text.clone(),
        from_text: form.from_text.clone(),
        to_text: form.to_text.clone(),
        journey_type: form.journey_type,
        sort: request.sort,
        sort_options: sort_options(&link),
        routes,
        selected: selected_route
            .map(|route| RouteView::from_route(route, registry, selection, &link)),
        geometry_json,
        passengers: PassengerView::new(form),
        back_href: index_href(form),
    })
}

/// Filtered, sorted routes as JSON.
async fn list_routes(
    State(state): State<AppState>,
    Query(req): Query<RoutesRequest>,
) -> Result<Json<RoutesResponse>, AppError> {
    let catalog = loaded_catalog(&state).await?;
    let form = SearchForm {
        query: req.q.unwrap_or_default(),
        sort: parse_sort(req.sort.as_deref())?,
        ..Default::default()
    };
    let request = form.route_query();

    let routes = query(&catalog, &request)
        .into_iter()
        .map(|route| RouteResult::from_route(route, catalog.registry()))
        .collect();

    Ok(Json(RoutesResponse {
        query: request.text,
        sort: request.sort,
        routes,
    }))
}

/// Map geometry for a single route.
async fn route_geometry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GeometryResponse>, AppError> {
    let catalog = loaded_catalog(&state).await?;
    let route = catalog
        .get(&id)
        .ok_or_else(|| CatalogError::RouteNotFound { id: id.clone() })?;
    let geometry = RouteGeometry::for_route(route, catalog.registry())?;

    Ok(Json(GeometryResponse::from_geometry(route, &geometry)))
}

/// Search stations by name or code.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let catalog = loaded_catalog(&state).await?;
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);

    let stations = catalog
        .registry()
        .search(&req.q, limit)
        .into_iter()
        .map(|s| StationSearchResult {
            code: s.code.to_string(),
            name: s.name.clone(),
            lat: s.coordinates.latitude(),
            lon: s.coordinates.longitude(),
        })
        .collect();

    Ok(Json(StationSearchResponse { stations }))
}

/// HTML 404 for anything the router does not know.
async fn not_found_page() -> Response {
    let page = ErrorTemplate {
        title: "Not Found".to_string(),
        message: "There is nothing at this address.".to_string(),
    };
    match render(page) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn loaded_catalog(state: &AppState) -> Result<Arc<RouteCatalog>, AppError> {
    state.catalog.get().await.ok_or_else(|| AppError::Unavailable {
        message: "Catalog is still loading".to_string(),
    })
}

fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html))
}

/// Missing or blank means the default key.
fn parse_sort(raw: Option<&str>) -> Result<SortKey, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(SortKey::default()),
        Some(s) => s.parse().map_err(|e: crate::query::InvalidSortKey| AppError::BadRequest {
            message: e.to_string(),
        }),
    }
}

fn parse_journey_type(raw: Option<&str>) -> Result<JourneyType, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(JourneyType::default()),
        Some(s) => s.parse().map_err(|e: crate::query::InvalidJourneyType| AppError::BadRequest {
            message: e.to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::RouteNotFound { .. } | CatalogError::NotFound { .. } => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogState, sample_catalog};

    fn ready_state() -> AppState {
        AppState::with_catalog(sample_catalog().unwrap())
    }

    fn ids(response: &RoutesResponse) -> Vec<&str> {
        response.routes.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn list_routes_default_sort_is_price() {
        let Json(response) = list_routes(State(ready_state()), Query(RoutesRequest::default()))
            .await
            .unwrap();

        assert_eq!(response.sort, SortKey::Price);
        assert_eq!(ids(&response), vec!["6", "3", "1", "5", "2", "4"]);
    }

    #[tokio::test]
    async fn list_routes_filters_and_sorts() {
        let req = RoutesRequest {
            q: Some("coimbatore".into()),
            sort: Some("departure".into()),
        };
        let Json(response) = list_routes(State(ready_state()), Query(req)).await.unwrap();

        assert_eq!(response.query, "coimbatore");
        assert_eq!(ids(&response), vec!["4", "2", "6", "1"]);
    }

    #[tokio::test]
    async fn list_routes_by_duration_is_numeric() {
        let req = RoutesRequest {
            q: None,
            sort: Some("Duration".into()),
        };
        let Json(response) = list_routes(State(ready_state()), Query(req)).await.unwrap();

        assert_eq!(ids(&response), vec!["6", "5", "3", "2", "1", "4"]);
        assert_eq!(response.routes[0].duration, "4h 30m");
    }

    #[tokio::test]
    async fn list_routes_rejects_unknown_sort() {
        let req = RoutesRequest {
            q: None,
            sort: Some("fastest".into()),
        };
        let err = list_routes(State(ready_state()), Query(req)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn list_routes_unavailable_while_loading() {
        let state = AppState::new(CatalogState::pending());
        let err = list_routes(State(state), Query(RoutesRequest::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unavailable { .. }));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn geometry_for_known_route() {
        let Json(geometry) = route_geometry(State(ready_state()), Path("3".to_string()))
            .await
            .unwrap();

        let labels: Vec<_> = geometry.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Tiruchirappalli", "Ariyalur", "Mayiladuthurai", "Chennai"]
        );
    }

    #[tokio::test]
    async fn geometry_for_unknown_route_is_404() {
        let err = route_geometry(State(ready_state()), Path("99".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn station_search_limits_results() {
        let req = StationSearchRequest {
            q: "a".into(),
            limit: Some(2),
        };
        let Json(response) = search_stations(State(ready_state()), Query(req)).await.unwrap();
        assert_eq!(response.stations.len(), 2);
    }

    #[tokio::test]
    async fn station_search_by_code() {
        let req = StationSearchRequest {
            q: "tpj".into(),
            limit: None,
        };
        let Json(response) = search_stations(State(ready_state()), Query(req)).await.unwrap();
        assert_eq!(response.stations[0].name, "Tiruchirappalli");
    }

    #[tokio::test]
    async fn index_page_renders_form() {
        let req = IndexRequest {
            passengers: Some(12),
            ..Default::default()
        };
        let Html(html) = index_page(Query(req)).await.unwrap();

        assert!(html.contains("9 Passengers"));
        assert!(html.contains("Popular Train Routes"));
    }

    #[tokio::test]
    async fn listing_page_shows_loading_state() {
        let state = AppState::new(CatalogState::pending());
        let Html(html) = listing_page(State(state), Query(ListingRequest::default()))
            .await
            .unwrap();

        assert!(html.contains("Loading train data..."));
    }

    #[tokio::test]
    async fn listing_page_uses_destination_as_query() {
        let req = ListingRequest {
            to: Some("Coimbatore".into()),
            ..Default::default()
        };
        let Html(html) = listing_page(State(ready_state()), Query(req)).await.unwrap();

        assert!(html.contains("Vaigai Link"));
        assert!(!html.contains("Cholan Express"));
    }

    #[tokio::test]
    async fn listing_page_keeps_landing_form_state() {
        let req = ListingRequest {
            from: Some("Tiruchirappalli".into()),
            to: Some("Chennai".into()),
            journey_type: Some("round-trip".into()),
            passengers: Some(2),
            ..Default::default()
        };
        let Html(html) = listing_page(State(ready_state()), Query(req)).await.unwrap();

        assert!(html.contains("Round Trip from Tiruchirappalli to Chennai"));
        assert!(html.contains("name=\"from\" value=\"Tiruchirappalli\""));
        assert!(html.contains("name=\"journey_type\" value=\"round-trip\""));
        // Askama escapes `&` in attributes
        assert!(html.contains(
            "sort=duration&amp;selected=1&amp;from=Tiruchirappalli&amp;to=Chennai\
             &amp;journey_type=round-trip&amp;passengers=2"
        ));
        assert!(html.contains("passengers=2&amp;from=Tiruchirappalli&amp;to=Chennai"));
    }

    #[test]
    fn listing_template_links_carry_form_state() {
        let catalog = sample_catalog().unwrap();
        let form = SearchForm {
            from_text: "Coimbatore".into(),
            journey_type: JourneyType::MultiCity,
            ..Default::default()
        };
        let page = listing_template(&catalog, &form, &Selection::initial(&catalog)).unwrap();

        assert_eq!(page.journey_type, JourneyType::MultiCity);
        assert_eq!(page.back_href, "/?passengers=1&from=Coimbatore&journey_type=multi-city");
        for href in page.routes.iter().map(|r| &r.select_href) {
            assert!(href.contains("&from=Coimbatore&journey_type=multi-city&"), "{href}");
        }
        assert!(page.sort_options.iter().all(|o| o.href.contains("journey_type=multi-city")));
    }

    #[tokio::test]
    async fn listing_page_ignores_unknown_selection() {
        let req = ListingRequest {
            selected: Some("99".into()),
            ..Default::default()
        };
        let Html(html) = listing_page(State(ready_state()), Query(req)).await.unwrap();
        assert!(html.contains("data-geometry="));
    }

    #[test]
    fn listing_template_selects_first_route_by_default() {
        let catalog = sample_catalog().unwrap();
        let selection = Selection::initial(&catalog);
        let page = listing_template(&catalog, &SearchForm::default(), &selection).unwrap();

        assert!(!page.loading);
        assert_eq!(page.routes.len(), 6);
        assert_eq!(page.selected.as_ref().map(|r| r.id.as_str()), Some("1"));
        assert_eq!(page.routes.iter().filter(|r| r.is_selected).count(), 1);

        let geometry: serde_json::Value =
            serde_json::from_str(page.geometry_json.as_deref().unwrap()).unwrap();
        assert_eq!(geometry["style"], "solid");
    }

    #[test]
    fn listing_template_keeps_selection_outside_filter() {
        let catalog = sample_catalog().unwrap();
        let mut selection = Selection::initial(&catalog);
        selection.select_id(&catalog, "5").unwrap();
        let form = SearchForm {
            query: "chennai".into(),
            ..Default::default()
        };
        let page = listing_template(&catalog, &form, &selection).unwrap();

        assert!(page.routes.iter().all(|r| !r.is_selected));
        assert_eq!(
            page.selected.map(|r| r.name),
            Some("Mayiladuthurai Link".to_string())
        );
        assert!(page.sort_options[0].href.contains("selected=5"));
    }

    #[test]
    fn catalog_errors_map_to_status() {
        let not_found: AppError = CatalogError::RouteNotFound { id: "7".into() }.into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let internal: AppError = CatalogError::DuplicateRouteId("1".into()).into();
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
