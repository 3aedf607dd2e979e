//! Observer surface

use atelier_core::error::Result;
use atelier_core::{Observer, SessionId, SubscriberId};
use std::sync::Arc;

/// Observer registration against documents in the caller's workspace
pub trait ObserverApi {
    /// Attach an observer to a document
    ///
    /// Returns the opaque subscriber id that detach and failure pruning
    /// operate on. Idempotent per (document, declared identity). An
    /// observer whose identity check fails is rejected with
    /// `RemoteUnreachable`.
    fn attach_observer(
        &self,
        token: SessionId,
        document: &str,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriberId>;

    /// Detach a subscriber; no-op (`false`) if absent
    fn detach_observer(
        &self,
        token: SessionId,
        document: &str,
        id: SubscriberId,
    ) -> Result<bool>;
}
