//! Delivery of recomputed catalog views
//!
//! The filter engine hands every freshly computed view to a [`FilterSink`].
//! Plain closures are sinks, which covers the common "re-render the grid"
//! case. [`BroadcastSink`] fans views out to async subscribers over
//! `tokio::sync::broadcast`.
//!
//! ```text
//! CatalogFilterEngine::recompute() ──▶ FilterSink::publish() ──▶ closure
//!                                                             ──▶ BroadcastSink ──▶ receivers
//! ```

use crate::core::product::Product;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Receiver of filtered catalog views
pub trait FilterSink: Send + Sync {
    /// Called once per recomputation that produced a new view
    fn publish(&self, filtered: &[Product]);
}

impl<F> FilterSink for F
where
    F: Fn(&[Product]) + Send + Sync,
{
    fn publish(&self, filtered: &[Product]) {
        self(filtered)
    }
}

/// Sink that discards every view
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl FilterSink for NoopSink {
    fn publish(&self, _filtered: &[Product]) {}
}

/// A published view with the metadata subscribers need to order them
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Unique snapshot ID
    pub id: Uuid,
    /// When the view was computed
    pub timestamp: DateTime<Utc>,
    /// The filtered products, in display order
    pub products: Arc<[Product]>,
}

impl ViewSnapshot {
    pub fn new(products: &[Product]) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            products: Arc::from(products),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Broadcast-based sink
///
/// Cheap to clone; every clone publishes into the same channel. Slow
/// receivers that fall more than `capacity` views behind get `Lagged` on
/// their next `recv()`, which is harmless here since only the latest view
/// matters.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<ViewSnapshot>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Views published before this call are not received
    pub fn subscribe(&self) -> broadcast::Receiver<ViewSnapshot> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(16)
    }
}

impl FilterSink for BroadcastSink {
    fn publish(&self, filtered: &[Product]) {
        // send() only fails when nobody is listening
        let receivers = self.sender.send(ViewSnapshot::new(filtered)).unwrap_or(0);
        tracing::trace!(receivers, visible = filtered.len(), "Published catalog view");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_is_a_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            move |view: &[Product]| seen.lock().unwrap().push(view.len())
        };

        sink.publish(&[Product::new(1, "a", 1.0)]);
        sink.publish(&[]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
    }

    #[tokio::test]
    async fn test_broadcast_sink_delivers_snapshots() {
        let sink = BroadcastSink::new(4);
        let mut rx = sink.subscribe();
        assert_eq!(sink.receiver_count(), 1);

        sink.publish(&[Product::new(1, "a", 1.0), Product::new(2, "b", 2.0)]);

        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.products[1].name, "b");
    }

    #[test]
    fn test_broadcast_without_subscribers_is_fine() {
        let sink = BroadcastSink::default();
        sink.publish(&[Product::new(1, "a", 1.0)]);
        assert_eq!(sink.receiver_count(), 0);
    }
}
