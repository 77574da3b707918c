//! Shared handle to the catalog once it becomes available.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use super::route_catalog::RouteCatalog;

/// Thread-safe, read-only view of the loaded catalog.
///
/// The catalog is validated before the handle is created; the handle only
/// controls when it becomes visible. Until then [`CatalogState::get`]
/// returns `None` and callers render a loading state.
#[derive(Clone, Default)]
pub struct CatalogState {
    inner: Arc<RwLock<Option<Arc<RouteCatalog>>>>,
}

impl CatalogState {
    /// A state whose catalog is available immediately.
    pub fn ready(catalog: RouteCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(catalog)))),
        }
    }

    /// A state with no catalog yet.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Publish the catalog after `delay`, mimicking a slow upstream fetch.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn publish_after(catalog: RouteCatalog, delay: Duration) -> Self {
        if delay.is_zero() {
            return Self::ready(catalog);
        }

        let state = Self::pending();
        let publisher = state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let routes = catalog.len();
            publisher.publish(catalog).await;
            info!(routes, "catalog available");
        });
        state
    }

    /// Make the catalog visible. Replaces any previously published catalog.
    pub async fn publish(&self, catalog: RouteCatalog) {
        let mut guard = self.inner.write().await;
        *guard = Some(Arc::new(catalog));
    }

    /// The catalog, if it has been published.
    pub async fn get(&self) -> Option<Arc<RouteCatalog>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Whether the catalog has been published.
    pub async fn is_ready(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    #[tokio::test]
    async fn ready_is_available_immediately() {
        let state = CatalogState::ready(sample_catalog().unwrap());
        assert!(state.is_ready().await);
        assert_eq!(state.get().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn pending_has_no_catalog() {
        let state = CatalogState::pending();
        assert!(!state.is_ready().await);
        assert!(state.get().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn publish_after_delay() {
        let state = CatalogState::publish_after(sample_catalog().unwrap(), Duration::from_secs(1));
        assert!(!state.is_ready().await);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!state.is_ready().await);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(state.is_ready().await);
    }

    #[tokio::test]
    async fn zero_delay_is_ready() {
        let state = CatalogState::publish_after(sample_catalog().unwrap(), Duration::ZERO);
        assert!(state.is_ready().await);
    }

    #[tokio::test]
    async fn clones_share_the_catalog() {
        let state = CatalogState::pending();
        let other = state.clone();
        state.publish(sample_catalog().unwrap()).await;
        assert!(other.is_ready().await);
    }
}
