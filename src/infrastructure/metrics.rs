//! Operational counters fed by domain events.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::events::{LinkEvent, LinkEventObserver};

/// Subscribes to [`LinkEvent`]s and keeps process-local counters.
///
/// Every event is also forwarded to the `metrics` facade as
/// `shortener_<event>_total`, so any installed recorder picks it up.
#[derive(Debug, Default)]
pub struct MetricsObserver {
    links_created: AtomicU64,
    links_reused: AtomicU64,
    links_resolved: AtomicU64,
    resolution_failures: AtomicU64,
    visit_count_failures: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub links_created: u64,
    pub links_reused: u64,
    pub links_resolved: u64,
    pub resolution_failures: u64,
    pub visit_count_failures: u64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            links_created: self.links_created.load(Ordering::Relaxed),
            links_reused: self.links_reused.load(Ordering::Relaxed),
            links_resolved: self.links_resolved.load(Ordering::Relaxed),
            resolution_failures: self.resolution_failures.load(Ordering::Relaxed),
            visit_count_failures: self.visit_count_failures.load(Ordering::Relaxed),
        }
    }
}

impl LinkEventObserver for MetricsObserver {
    fn on_event(&self, event: &LinkEvent) {
        tracing::trace!(event = event.name(), "Link event");

        let counter = match event {
            LinkEvent::LinkCreated { is_custom, .. } => {
                let kind = if *is_custom { "custom" } else { "generated" };
                metrics::counter!("shortener_link_created_total", "kind" => kind).increment(1);
                &self.links_created
            }
            LinkEvent::LinkReused { .. } => {
                metrics::counter!("shortener_link_reused_total").increment(1);
                &self.links_reused
            }
            LinkEvent::LinkResolved { .. } => {
                metrics::counter!("shortener_link_resolved_total").increment(1);
                &self.links_resolved
            }
            LinkEvent::ResolutionFailed { .. } => {
                metrics::counter!("shortener_resolution_failed_total").increment(1);
                &self.resolution_failures
            }
            LinkEvent::VisitCountFailed { .. } => {
                metrics::counter!("shortener_visit_count_failed_total").increment(1);
                &self.visit_count_failures
            }
        };

        counter.fetch_add(1, Ordering::Relaxed);
    }
}
