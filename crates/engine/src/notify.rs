//! Notification hub
//!
//! Per-document subscriber lists with best-effort delivery. Subscribers
//! are keyed by an opaque `SubscriberId` issued at attach time; detach and
//! failure pruning operate on that id only. Delivery is sequential within
//! one document; broadcasts to different documents take different map
//! entries and proceed independently.

use atelier_core::error::Result;
use atelier_core::{DocumentEvent, EntityKind, Error, Observer, SubscriberId};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

struct Subscriber {
    id: SubscriberId,
    /// Identity the observer declared at attach; used for echo suppression
    identity: String,
    observer: Arc<dyn Observer>,
}

/// Per-document subscriber lists inside one workspace
#[derive(Default)]
pub struct NotificationHub {
    subscribers: DashMap<String, Vec<Subscriber>>,
}

impl NotificationHub {
    /// Create an empty hub
    pub fn new() -> Self {
        NotificationHub {
            subscribers: DashMap::new(),
        }
    }

    /// Open an (initially empty) subscription list for a document
    pub fn open_channel(&self, document: &str) {
        self.subscribers.entry(document.to_string()).or_default();
    }

    /// Drop a document's subscription list entirely
    pub fn close_channel(&self, document: &str) {
        self.subscribers.remove(document);
    }

    /// Attach an observer to a document
    ///
    /// The observer's declared identity is captured once, here; an observer
    /// whose identity check fails is treated as dead and rejected. Attach
    /// is idempotent per (document, identity): re-attaching the same
    /// identity returns the existing subscriber id.
    pub fn attach(&self, document: &str, observer: Arc<dyn Observer>) -> Result<SubscriberId> {
        let identity = observer
            .identity()
            .map_err(|e| Error::RemoteUnreachable(format!("identity check failed: {e}")))?;

        let mut list = self
            .subscribers
            .get_mut(document)
            .ok_or_else(|| Error::not_found(EntityKind::Document, document))?;

        if let Some(existing) = list.iter().find(|s| s.identity == identity) {
            debug!(document, identity, subscriber = %existing.id, "already attached");
            return Ok(existing.id);
        }

        let id = SubscriberId::new();
        list.push(Subscriber {
            id,
            identity,
            observer,
        });
        debug!(document, subscriber = %id, "observer attached");
        Ok(id)
    }

    /// Detach a subscriber by id; no-op (`false`) if absent
    pub fn detach(&self, document: &str, id: SubscriberId) -> bool {
        let Some(mut list) = self.subscribers.get_mut(document) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.id != id);
        list.len() < before
    }

    /// Number of live subscribers for a document
    pub fn subscriber_count(&self, document: &str) -> usize {
        self.subscribers
            .get(document)
            .map(|l| l.len())
            .unwrap_or(0)
    }

    /// Deliver a change event to every subscriber of the document
    ///
    /// Skips the subscriber whose declared identity matches the editor
    /// (echo suppression). Any delivery failure removes that subscriber
    /// permanently; the triggering operation still succeeds. Returns the
    /// number of successful deliveries.
    pub fn broadcast(&self, event: &DocumentEvent) -> usize {
        let Some(mut list) = self.subscribers.get_mut(&event.document) else {
            return 0;
        };

        let mut delivered = 0;
        let mut dead: Vec<SubscriberId> = Vec::new();

        for subscriber in list.iter() {
            if subscriber.identity == event.editor {
                continue;
            }
            match subscriber.observer.notify(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        document = %event.document,
                        subscriber = %subscriber.id,
                        error = %e,
                        "delivery failed, pruning subscriber"
                    );
                    dead.push(subscriber.id);
                }
            }
        }

        if !dead.is_empty() {
            list.retain(|s| !dead.contains(&s.id));
        }
        delivered
    }
}
