//! In-memory asset ledger for tests and development.
//!
//! Models the three asset kinds on one ledger: a fungible balance with a
//! spending allowance, unique items with per-item owners, and semi-fungible
//! per-item balances with an operator approval. Approval semantics mirror
//! the on-chain standards the engine targets: fungible transfers draw down
//! a numeric allowance, unique and semi-fungible transfers require an
//! approved-for-all flag.

use crate::{AdapterError, AssetAdapter};
use aevia_types::AssetKind;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct LedgerState {
	/// Fungible balances per account.
	balances: HashMap<Address, U256>,
	/// Remaining fungible allowance each owner granted to the spender.
	allowances: HashMap<Address, U256>,
	/// Owner of each unique item.
	item_owners: HashMap<U256, Address>,
	/// Semi-fungible balances per (account, item).
	item_balances: HashMap<(Address, U256), U256>,
	/// Owners that approved the spender for unique/semi-fungible moves.
	operators: HashMap<Address, bool>,
}

/// Mock asset ledger with standing-approval checks.
///
/// `spender` is the account the ledger expects transfers to be authorized
/// through, in practice the engine instance address. Custody stays with
/// the owners; the ledger only honors transfers covered by an approval.
pub struct MockAssetLedger {
	spender: Address,
	state: RwLock<LedgerState>,
}

impl MockAssetLedger {
	/// Creates an empty ledger trusting `spender` as the approved mover.
	pub fn new(spender: Address) -> Self {
		Self {
			spender,
			state: RwLock::new(LedgerState::default()),
		}
	}

	/// Credits `amount` fungible units to `account`.
	pub async fn mint_fungible(&self, account: Address, amount: U256) {
		let mut state = self.state.write().await;
		let balance = state.balances.entry(account).or_default();
		*balance += amount;
	}

	/// Assigns a fresh unique item to `account`.
	pub async fn mint_unique(&self, account: Address, item_id: U256) -> Result<(), AdapterError> {
		let mut state = self.state.write().await;
		if state.item_owners.contains_key(&item_id) {
			return Err(AdapterError::Backend(format!(
				"item {} already minted",
				item_id
			)));
		}
		state.item_owners.insert(item_id, account);
		Ok(())
	}

	/// Credits `amount` units of item `item_id` to `account`.
	pub async fn mint_semi_fungible(&self, account: Address, item_id: U256, amount: U256) {
		let mut state = self.state.write().await;
		let balance = state.item_balances.entry((account, item_id)).or_default();
		*balance += amount;
	}

	/// Sets the fungible allowance `owner` grants to the spender.
	pub async fn approve(&self, owner: Address, allowance: U256) {
		self.state.write().await.allowances.insert(owner, allowance);
	}

	/// Grants or withdraws the spender's operator approval for `owner`.
	pub async fn set_approval_for_all(&self, owner: Address, approved: bool) {
		self.state.write().await.operators.insert(owner, approved);
	}

	/// Fungible balance of `account`.
	pub async fn balance_of(&self, account: Address) -> U256 {
		self.state
			.read()
			.await
			.balances
			.get(&account)
			.copied()
			.unwrap_or_default()
	}

	/// Current owner of a unique item, if minted.
	pub async fn item_owner(&self, item_id: U256) -> Option<Address> {
		self.state.read().await.item_owners.get(&item_id).copied()
	}

	/// Semi-fungible balance of `account` for `item_id`.
	pub async fn item_balance_of(&self, account: Address, item_id: U256) -> U256 {
		self.state
			.read()
			.await
			.item_balances
			.get(&(account, item_id))
			.copied()
			.unwrap_or_default()
	}
}

#[async_trait]
impl AssetAdapter for MockAssetLedger {
	async fn transfer(
		&self,
		kind: AssetKind,
		item_id: U256,
		quantity: U256,
		from: Address,
		to: Address,
	) -> Result<(), AdapterError> {
		let mut state = self.state.write().await;
		match kind {
			AssetKind::Fungible => {
				let allowance = state.allowances.get(&from).copied().unwrap_or_default();
				if allowance < quantity {
					return Err(AdapterError::MissingApproval {
						owner: from,
						spender: self.spender,
					});
				}
				let held = state.balances.get(&from).copied().unwrap_or_default();
				if held < quantity {
					return Err(AdapterError::InsufficientBalance {
						account: from,
						held,
						needed: quantity,
					});
				}
				state.allowances.insert(from, allowance - quantity);
				state.balances.insert(from, held - quantity);
				let credit = state.balances.entry(to).or_default();
				*credit += quantity;
			}
			AssetKind::Unique => {
				let owner = state
					.item_owners
					.get(&item_id)
					.copied()
					.ok_or(AdapterError::UnknownItem { item_id })?;
				if owner != from {
					return Err(AdapterError::NotItemOwner {
						account: from,
						item_id,
					});
				}
				if !state.operators.get(&from).copied().unwrap_or(false) {
					return Err(AdapterError::MissingApproval {
						owner: from,
						spender: self.spender,
					});
				}
				state.item_owners.insert(item_id, to);
			}
			AssetKind::SemiFungible => {
				if !state.operators.get(&from).copied().unwrap_or(false) {
					return Err(AdapterError::MissingApproval {
						owner: from,
						spender: self.spender,
					});
				}
				let held = state
					.item_balances
					.get(&(from, item_id))
					.copied()
					.unwrap_or_default();
				if held < quantity {
					return Err(AdapterError::InsufficientBalance {
						account: from,
						held,
						needed: quantity,
					});
				}
				state.item_balances.insert((from, item_id), held - quantity);
				let credit = state.item_balances.entry((to, item_id)).or_default();
				*credit += quantity;
			}
		}
		Ok(())
	}
}
