//! Lifecycle ledger for authorization records.
//!
//! This crate tracks the per-`(owner, legacy_id)` state of every
//! authorization the engine has seen: `Unused` (the default for records
//! never written), `Executed` or `Revoked`. Records are created implicitly
//! the first time their key is referenced, transition at most once, and are
//! never deleted: they double as the replay guard and the audit trail.
//!
//! Storage backends are pluggable behind [`LedgerStore`]; the
//! [`AuthorizationLedger`] service layers per-key mutual exclusion on top so
//! check-then-set sequences are atomic with respect to concurrent callers,
//! including sequences that span an external asset-transfer call (see
//! [`ExecutionGuard`]).

use aevia_types::{AuthorizationState, LedgerKey};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// The record is already Executed or Revoked.
	#[error("authorization already executed or revoked")]
	AlreadyFinalized,
	/// Error that occurs during serialization/deserialization.
	#[error("serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("backend error: {0}")]
	Backend(String),
}

/// Low-level record store.
///
/// Backends persist terminal states only; a key that was never stored loads
/// as `None` and is interpreted as `Unused`. Implementations do not need to
/// provide any atomicity across calls; the service above them serializes
/// access per key.
#[async_trait]
pub trait LedgerStore: Send + Sync {
	/// Loads the recorded state for `key`, if any was ever stored.
	async fn load(&self, key: &LedgerKey) -> Result<Option<AuthorizationState>, LedgerError>;

	/// Persists `state` for `key`, overwriting any previous record.
	async fn store(&self, key: &LedgerKey, state: AuthorizationState) -> Result<(), LedgerError>;
}

/// Outcome of a revocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
	/// The record transitioned Unused -> Revoked.
	Revoked,
	/// The record was already Revoked; revocation is idempotent.
	AlreadyRevoked,
}

/// Keyed lifecycle store with per-key mutual exclusion.
///
/// All state transitions for a given `(owner, legacy_id)` are serialized
/// through a per-key async mutex. A revocation racing an execution on the
/// same key linearizes behind whichever transition acquires the lock first;
/// the loser observes a finalized record and fails with
/// [`LedgerError::AlreadyFinalized`].
pub struct AuthorizationLedger {
	store: Box<dyn LedgerStore>,
	locks: DashMap<LedgerKey, Arc<Mutex<()>>>,
}

impl AuthorizationLedger {
	/// Creates a ledger over the given backend.
	pub fn new(store: Box<dyn LedgerStore>) -> Self {
		Self {
			store,
			locks: DashMap::new(),
		}
	}

	/// Acquires the mutex serializing transitions for `key`.
	async fn key_lock(&self, key: &LedgerKey) -> OwnedMutexGuard<()> {
		let lock = self
			.locks
			.entry(*key)
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.value()
			.clone();
		lock.lock_owned().await
	}

	async fn load_or_default(&self, key: &LedgerKey) -> Result<AuthorizationState, LedgerError> {
		Ok(self.store.load(key).await?.unwrap_or_default())
	}

	/// Current state of a record. Absent records are `Unused`.
	pub async fn state_of(
		&self,
		owner: Address,
		legacy_id: U256,
	) -> Result<AuthorizationState, LedgerError> {
		self.load_or_default(&LedgerKey::new(owner, legacy_id)).await
	}

	/// Claims an `Unused` record for execution.
	///
	/// Acquires the key lock and fails with [`LedgerError::AlreadyFinalized`]
	/// unless the record is `Unused`. The returned guard keeps the key
	/// locked; call [`ExecutionGuard::commit`] once the asset transfer has
	/// succeeded to persist `Executed`. Dropping the guard without
	/// committing leaves the record `Unused` and the authorization
	/// retryable.
	pub async fn begin_execution(
		&self,
		owner: Address,
		legacy_id: U256,
	) -> Result<ExecutionGuard<'_>, LedgerError> {
		let key = LedgerKey::new(owner, legacy_id);
		let lock = self.key_lock(&key).await;
		if self.load_or_default(&key).await?.is_finalized() {
			return Err(LedgerError::AlreadyFinalized);
		}
		Ok(ExecutionGuard {
			ledger: self,
			key,
			_lock: lock,
		})
	}

	/// Transitions Unused -> Executed in one atomic step.
	pub async fn mark_executed(&self, owner: Address, legacy_id: U256) -> Result<(), LedgerError> {
		self.begin_execution(owner, legacy_id).await?.commit().await
	}

	/// Owner-initiated revocation of the owner's own record.
	///
	/// Unused records transition to `Revoked`; revoking an already-revoked
	/// record is a no-op success. An executed transfer cannot be
	/// retroactively revoked and fails with
	/// [`LedgerError::AlreadyFinalized`].
	pub async fn revoke(
		&self,
		owner: Address,
		legacy_id: U256,
	) -> Result<RevokeOutcome, LedgerError> {
		let key = LedgerKey::new(owner, legacy_id);
		let _lock = self.key_lock(&key).await;
		match self.load_or_default(&key).await? {
			AuthorizationState::Unused => {
				self.store.store(&key, AuthorizationState::Revoked).await?;
				tracing::debug!(key = %key, "authorization revoked");
				Ok(RevokeOutcome::Revoked)
			}
			AuthorizationState::Revoked => Ok(RevokeOutcome::AlreadyRevoked),
			AuthorizationState::Executed => Err(LedgerError::AlreadyFinalized),
		}
	}
}

/// Exclusive claim on an `Unused` record, held across the transfer call.
///
/// While the guard is alive no other execution or revocation of the same
/// key can make progress, so the external transfer and the subsequent
/// commit form one atomic unit from the ledger's point of view.
pub struct ExecutionGuard<'a> {
	ledger: &'a AuthorizationLedger,
	key: LedgerKey,
	_lock: OwnedMutexGuard<()>,
}

impl ExecutionGuard<'_> {
	/// The record this guard has claimed.
	pub fn key(&self) -> &LedgerKey {
		&self.key
	}

	/// Persists the `Executed` state and releases the key.
	pub async fn commit(self) -> Result<(), LedgerError> {
		self.ledger
			.store
			.store(&self.key, AuthorizationState::Executed)
			.await?;
		tracing::debug!(key = %self.key, "authorization executed");
		Ok(())
	}
}
