//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::config::ShortenerConfig;
use crate::domain::clock::SystemClock;
use crate::domain::events::LinkEventObserver;
use crate::infrastructure::metrics::MetricsObserver;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::utils::code_generator::AlphabetError;

/// Cloneable handle to the services behind the router.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub redirect_service: Arc<RedirectService<SqliteLinkRepository>>,
    pub link_repository: Arc<SqliteLinkRepository>,
    pub metrics: Arc<MetricsObserver>,
    /// Public base for short URLs; derived from request headers when unset.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires repositories, services and the metrics observer over `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if the configured alphabet is unusable.
    pub fn new(
        pool: SqlitePool,
        shortener: ShortenerConfig,
        base_url: Option<String>,
    ) -> Result<Self, AlphabetError> {
        let link_repository = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
        let metrics = Arc::new(MetricsObserver::new());
        let observer: Arc<dyn LinkEventObserver> = metrics.clone();

        let redirect_service = Arc::new(RedirectService::new(
            link_repository.clone(),
            observer.clone(),
            shortener.operation_timeout,
        ));
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            Arc::new(SystemClock),
            observer,
            shortener,
        )?);

        Ok(Self {
            link_service,
            redirect_service,
            link_repository,
            metrics,
            base_url,
        })
    }
}
