//! Asset ledger adapters for the Aevia authorization engine.
//!
//! The engine never holds custody of assets. Moving value is delegated to
//! an [`AssetAdapter`] (one per asset contract) which operates on its own
//! ledger and enforces the standing approval the owner granted to the
//! engine. Adapter failures abort the whole request; the engine commits no
//! state on a failed transfer.

use aevia_types::AssetKind;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod mock;
}

/// Errors an asset ledger can report for a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
	/// The sender does not hold enough of the asset.
	#[error("insufficient balance: account {account} holds {held}, needs {needed}")]
	InsufficientBalance {
		account: Address,
		held: U256,
		needed: U256,
	},
	/// The owner never granted (or has exhausted) the engine's approval.
	#[error("missing approval: {owner} has not approved spender {spender}")]
	MissingApproval { owner: Address, spender: Address },
	/// The item does not exist on this ledger.
	#[error("unknown item {item_id}")]
	UnknownItem { item_id: U256 },
	/// The sender does not hold the item.
	#[error("account {account} does not hold item {item_id}")]
	NotItemOwner { account: Address, item_id: U256 },
	/// Any other ledger-side failure.
	#[error("backend error: {0}")]
	Backend(String),
}

/// Capability to move value on one asset ledger.
///
/// `from` must have pre-authorized the engine on the adapter's ledger; the
/// adapter checks that standing approval, not the engine. The call is
/// synchronous-and-fallible: it either moves the value or reports why not,
/// and it is the only step of a request with unbounded latency.
#[async_trait]
pub trait AssetAdapter: Send + Sync {
	/// Moves `quantity` of the asset (or the item `item_id`) from `from`
	/// to `to`.
	async fn transfer(
		&self,
		kind: AssetKind,
		item_id: U256,
		quantity: U256,
		from: Address,
		to: Address,
	) -> Result<(), AdapterError>;
}

/// Adapters keyed by asset contract address.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<Address, Arc<dyn AssetAdapter>>,
}

impl AdapterRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `adapter` as the ledger behind `token`.
	pub fn register(&mut self, token: Address, adapter: Arc<dyn AssetAdapter>) {
		self.adapters.insert(token, adapter);
	}

	/// Resolves the adapter for `token`.
	pub fn get(&self, token: &Address) -> Option<Arc<dyn AssetAdapter>> {
		self.adapters.get(token).cloned()
	}
}
