//! Domain events emitted by the shortening core.
//!
//! Services report what happened through a [`LinkEventObserver`] instead of
//! touching metrics directly. The metrics collaborator
//! ([`crate::infrastructure::metrics::MetricsObserver`]) subscribes here.

/// Something observable happened to a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A new link was inserted.
    LinkCreated { code: String, is_custom: bool },

    /// An existing auto-generated link was returned for a repeated target.
    LinkReused { code: String },

    /// A code was resolved to its target.
    LinkResolved { code: String },

    /// A code could not be resolved because it does not exist.
    ResolutionFailed { code: String },

    /// The redirect succeeded but the visit counter could not be incremented.
    VisitCountFailed { code: String },
}

impl LinkEvent {
    /// Short stable name, used as a log field and metric suffix.
    pub fn name(&self) -> &'static str {
        match self {
            LinkEvent::LinkCreated { .. } => "link_created",
            LinkEvent::LinkReused { .. } => "link_reused",
            LinkEvent::LinkResolved { .. } => "link_resolved",
            LinkEvent::ResolutionFailed { .. } => "resolution_failed",
            LinkEvent::VisitCountFailed { .. } => "visit_count_failed",
        }
    }
}

/// Receives [`LinkEvent`]s. Implementations must be cheap and non-blocking;
/// they run inline on the request path.
pub trait LinkEventObserver: Send + Sync {
    fn on_event(&self, event: &LinkEvent);
}

/// Observer that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LinkEventObserver for NoopObserver {
    fn on_event(&self, _event: &LinkEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let created = LinkEvent::LinkCreated {
            code: "abc".into(),
            is_custom: false,
        };
        assert_eq!(created.name(), "link_created");
        assert_eq!(
            LinkEvent::VisitCountFailed { code: "abc".into() }.name(),
            "visit_count_failed"
        );
    }

    #[test]
    fn test_noop_observer_accepts_events() {
        NoopObserver.on_event(&LinkEvent::LinkResolved { code: "x".into() });
    }
}
