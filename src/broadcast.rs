/*!
 * Snapshot Broadcasting
 * Fan-out of engine snapshots to transport consumers
 *
 * The engine publishes a fresh snapshot after every successful mutation and
 * every tick; a lagging or absent receiver never blocks or fails the engine.
 */

use crate::scheduler::Snapshot;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcast sink for engine snapshots
#[derive(Debug, Clone)]
pub struct SnapshotBroadcaster {
    tx: broadcast::Sender<Arc<Snapshot>>,
}

impl SnapshotBroadcaster {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a snapshot. Send errors (no subscribers) are ignored.
    pub fn publish(&self, snapshot: Snapshot) {
        let _ = self.tx.send(Arc::new(snapshot));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    /// Subscribe as an async stream, for transports that consume streams.
    pub fn subscribe_stream(&self) -> BroadcastStream<Arc<Snapshot>> {
        BroadcastStream::new(self.tx.subscribe())
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SnapshotBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
