//! Broadcast bus carrying emitted protocol records.

use aevia_types::ProtocolEvent;
use tokio::sync::broadcast;

/// Default buffer depth for subscribers.
const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out channel delivering records to any number of subscribers.
///
/// Emission is observability, not control flow: publishing to a bus with no
/// subscribers, or with lagging ones, never fails the originating request.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<ProtocolEvent>,
}

impl EventBus {
	/// Creates a bus whose subscribers buffer up to `capacity` records.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Opens a new subscription, receiving records published from now on.
	pub fn subscribe(&self) -> broadcast::Receiver<ProtocolEvent> {
		self.sender.subscribe()
	}

	/// Publishes a record to all current subscribers.
	pub fn publish(&self, event: ProtocolEvent) {
		// A send error only means there are no subscribers.
		let _ = self.sender.send(event);
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}
