use tracing::info;

use journey_server::catalog::{CatalogError, CatalogState, RouteCatalog, sample_catalog};
use journey_server::config::{ConfigError, ServerConfig};
use journey_server::logging::init_logger;
use journey_server::web::{AppState, create_router};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid route catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    init_logger()?;
    let config = ServerConfig::from_env()?;

    // Validate up front; a bad catalog never gets served
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            RouteCatalog::load_from_path(path)?
        }
        None => sample_catalog()?,
    };
    info!(
        stations = catalog.registry().len(),
        routes = catalog.len(),
        delay_ms = config.load_delay_ms,
        "catalog loaded"
    );

    let state = AppState::new(CatalogState::publish_after(catalog, config.load_delay()));
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Journey planner listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
