//! In-memory ledger backend.
//!
//! Keeps authorization records in a HashMap, providing fast access but no
//! persistence across restarts. Suitable for tests and for deployments
//! where an external process supervises durability.

use crate::{LedgerError, LedgerStore};
use aevia_types::{AuthorizationState, LedgerKey};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory ledger store.
pub struct MemoryStore {
	records: RwLock<HashMap<LedgerKey, AuthorizationState>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			records: RwLock::new(HashMap::new()),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl LedgerStore for MemoryStore {
	async fn load(&self, key: &LedgerKey) -> Result<Option<AuthorizationState>, LedgerError> {
		Ok(self.records.read().await.get(key).copied())
	}

	async fn store(&self, key: &LedgerKey, state: AuthorizationState) -> Result<(), LedgerError> {
		self.records.write().await.insert(*key, state);
		Ok(())
	}
}
