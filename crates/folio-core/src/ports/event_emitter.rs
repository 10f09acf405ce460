//! Event emitter trait for catalog change notifications.
//!
//! Implementations handle transport details (channels, websockets, etc.).

use tokio::sync::broadcast;

use crate::events::CatalogEvent;

/// Trait for emitting catalog events.
///
/// This abstraction keeps channel types out of the public API surface of
/// the store and admin services.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and CLI contexts that don't need events
/// - `BroadcastEmitter` - Fan-out to any number of subscribers
pub trait CatalogEventEmitter: Send + Sync {
    /// Emit a catalog event.
    ///
    /// This method should not block.
    fn emit(&self, event: CatalogEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn CatalogEventEmitter>;
}

/// A no-op event emitter for tests and CLI contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl CatalogEventEmitter for NoopEmitter {
    fn emit(&self, _event: CatalogEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn CatalogEventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter backed by a tokio broadcast channel.
///
/// Slow subscribers lag and lose the oldest events rather than blocking
/// the emitter.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<CatalogEvent>,
}

impl BroadcastEmitter {
    /// Create an emitter buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(64)
    }
}

impl CatalogEventEmitter for BroadcastEmitter {
    fn emit(&self, event: CatalogEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn CatalogEventEmitter> {
        Box::new(self.clone())
    }
}
