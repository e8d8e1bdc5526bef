//! Redirect resolution service.

use std::sync::Arc;

use tokio::time::{Instant, timeout_at};

use crate::domain::errors::ResolveError;
use crate::domain::events::{LinkEvent, LinkEventObserver};
use crate::domain::repositories::LinkRepository;

/// Resolves short codes to their targets and counts visits.
///
/// The lookup decides the outcome. Visit counting is best effort: a failed
/// increment is logged and reported as [`LinkEvent::VisitCountFailed`] but
/// the target is still returned.
pub struct RedirectService<L: LinkRepository> {
    link_repository: Arc<L>,
    observer: Arc<dyn LinkEventObserver>,
    operation_timeout: Option<std::time::Duration>,
}

impl<L: LinkRepository> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(
        link_repository: Arc<L>,
        observer: Arc<dyn LinkEventObserver>,
        operation_timeout: Option<std::time::Duration>,
    ) -> Self {
        Self {
            link_repository,
            observer,
            operation_timeout,
        }
    }

    /// Resolves `code`, using the configured default deadline.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_with_deadline`].
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        let deadline = self.operation_timeout.map(|t| Instant::now() + t);
        self.resolve_with_deadline(code, deadline).await
    }

    /// Resolves `code` to its target URL and increments its visit counter.
    ///
    /// `deadline` bounds the lookup. The increment gets whatever time is left;
    /// running out of it counts as a failed increment, not a failed resolve.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if no link has this code
    /// - [`ResolveError::StoreUnavailable`] if the lookup fails
    /// - [`ResolveError::DeadlineExceeded`] if `deadline` passes before the
    ///   lookup completes
    pub async fn resolve_with_deadline(
        &self,
        code: &str,
        deadline: Option<Instant>,
    ) -> Result<String, ResolveError> {
        let lookup = self.link_repository.find_by_code(code);

        let found = match deadline {
            Some(deadline) if deadline <= Instant::now() => {
                return Err(ResolveError::DeadlineExceeded);
            }
            Some(deadline) => timeout_at(deadline, lookup)
                .await
                .map_err(|_| ResolveError::DeadlineExceeded)??,
            None => lookup.await?,
        };

        let Some(link) = found else {
            tracing::debug!(code, "Short code not found");
            self.observer.on_event(&LinkEvent::ResolutionFailed {
                code: code.to_string(),
            });
            return Err(ResolveError::NotFound(code.to_string()));
        };

        self.count_visit(code, deadline).await;

        self.observer.on_event(&LinkEvent::LinkResolved {
            code: code.to_string(),
        });

        Ok(link.target)
    }

    async fn count_visit(&self, code: &str, deadline: Option<Instant>) {
        let increment = self.link_repository.increment_visits(code);

        let result = match deadline {
            Some(deadline) => match timeout_at(deadline, increment).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err("deadline exceeded".to_string()),
            },
            None => increment.await.map_err(|e| e.to_string()),
        };

        if let Err(error) = result {
            tracing::warn!(code, %error, "Failed to count visit");
            self.observer.on_event(&LinkEvent::VisitCountFailed {
                code: code.to_string(),
            });
        }
    }
}
