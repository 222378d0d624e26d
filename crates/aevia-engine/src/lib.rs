//! Orchestration core of the Aevia delegated-transfer engine.
//!
//! An owner pre-authorizes a one-time transfer off-chain by signing a
//! structured payload. A privileged operator later redeems that
//! authorization exactly once through [`AuthorizationEngine::execute_legacy`],
//! which runs the checks in a deliberate order (role, signature, lifecycle
//! state, parameters) before asking the asset ledger to move value and
//! committing the `Executed` state. Cheap, stateless checks always run
//! before state-mutating or external-effect-bearing ones, and every failure
//! aborts the request with no persisted effects.

pub mod builder;
pub mod event_bus;
pub mod validation;

pub use builder::EngineBuilder;
pub use event_bus::EventBus;
pub use validation::{validate_transfer, ParameterViolation};

use aevia_access::{AccessController, AccessError};
use aevia_adapter::{AdapterError, AdapterRegistry};
use aevia_ledger::{AuthorizationLedger, LedgerError, RevokeOutcome};
use aevia_types::{
	AccessEvent, AuthorizationState, LegacyEvent, LegacyTransfer, ProtocolEvent,
};
use aevia_verifier::{verify_owner, SigningDomain, VerifierError};
use alloy_primitives::{Address, U256};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

/// Errors surfaced by engine operations.
///
/// Every variant is terminal for the request: nothing is retried internally
/// and no persisted state changes on failure. A failed execution leaves the
/// authorization `Unused` and retryable unless the failure is
/// [`AlreadyFinalized`](EngineError::AlreadyFinalized), which is permanent.
#[derive(Debug, Error)]
pub enum EngineError {
	/// Caller lacks the role the operation requires.
	#[error("unauthorized: {0}")]
	Unauthorized(Address),
	/// The recovered signer differs from the declared owner, or the
	/// signature is malformed.
	#[error("invalid signature")]
	InvalidSignature,
	/// The authorization is already executed or revoked.
	#[error("authorization already executed or revoked")]
	AlreadyFinalized,
	/// A kind-specific parameter rule was violated.
	#[error("invalid parameters: {0}")]
	InvalidParameters(#[from] ParameterViolation),
	/// The asset ledger refused or failed the transfer.
	#[error("transfer failed: {0}")]
	TransferFailed(#[from] AdapterError),
	/// The lifecycle store itself failed.
	#[error("ledger error: {0}")]
	Ledger(String),
}

impl From<AccessError> for EngineError {
	fn from(err: AccessError) -> Self {
		match err {
			AccessError::Unauthorized(account) => EngineError::Unauthorized(account),
		}
	}
}

impl From<VerifierError> for EngineError {
	fn from(err: VerifierError) -> Self {
		match err {
			VerifierError::InvalidSignature => EngineError::InvalidSignature,
		}
	}
}

impl From<LedgerError> for EngineError {
	fn from(err: LedgerError) -> Self {
		match err {
			LedgerError::AlreadyFinalized => EngineError::AlreadyFinalized,
			other => EngineError::Ledger(other.to_string()),
		}
	}
}

/// The delegated-transfer authorization engine.
///
/// Holds the signing domain of this instance, the role model, the lifecycle
/// ledger and the registered asset adapters. All methods take `&self`; the
/// engine is shared behind an `Arc` in concurrent deployments and the
/// ledger serializes state transitions per `(owner, legacy_id)`.
pub struct AuthorizationEngine {
	domain: SigningDomain,
	access: AccessController,
	ledger: AuthorizationLedger,
	adapters: AdapterRegistry,
	event_bus: EventBus,
}

impl AuthorizationEngine {
	/// Assembles an engine from its parts. Most callers go through
	/// [`EngineBuilder`] instead.
	pub fn new(
		domain: SigningDomain,
		access: AccessController,
		ledger: AuthorizationLedger,
		adapters: AdapterRegistry,
		event_bus: EventBus,
	) -> Self {
		Self {
			domain,
			access,
			ledger,
			adapters,
			event_bus,
		}
	}

	/// The signing domain owners must target for their signatures to
	/// verify against this instance.
	pub fn domain(&self) -> &SigningDomain {
		&self.domain
	}

	/// Opens a subscription to the records this engine emits.
	pub fn subscribe(&self) -> broadcast::Receiver<ProtocolEvent> {
		self.event_bus.subscribe()
	}

	/// Redeems a signed authorization exactly once.
	///
	/// Checks run in order: operator role, signature, lifecycle state,
	/// kind-specific parameters; only then is the asset adapter invoked.
	/// The `(owner, legacy_id)` key stays locked from the state check
	/// through the commit, so a concurrent duplicate or a racing
	/// revocation observes a finalized record rather than a second
	/// transfer. An adapter failure drops the claim uncommitted; the
	/// record stays `Unused` and the call may be retried.
	#[instrument(
		skip(self, transfer, signature),
		fields(legacy_id = %transfer.legacy_id, owner = %transfer.from)
	)]
	pub async fn execute_legacy(
		&self,
		caller: Address,
		transfer: LegacyTransfer,
		signature: &[u8],
	) -> Result<(), EngineError> {
		if !self.access.is_operator(caller).await {
			warn!(caller = %caller, "execution attempt by non-operator");
			return Err(EngineError::Unauthorized(caller));
		}

		verify_owner(&self.domain, &transfer, signature)?;

		let claim = self
			.ledger
			.begin_execution(transfer.from, transfer.legacy_id)
			.await?;

		validate_transfer(transfer.kind, transfer.item_id, transfer.quantity)?;

		let adapter = self.adapters.get(&transfer.token).ok_or_else(|| {
			EngineError::TransferFailed(AdapterError::Backend(format!(
				"no adapter registered for asset contract {}",
				transfer.token
			)))
		})?;
		adapter
			.transfer(
				transfer.kind,
				transfer.item_id,
				transfer.quantity,
				transfer.from,
				transfer.to,
			)
			.await?;

		claim.commit().await?;

		info!(
			kind = ?transfer.kind,
			token = %transfer.token,
			quantity = %transfer.quantity,
			to = %transfer.to,
			"legacy executed"
		);
		self.event_bus
			.publish(ProtocolEvent::Legacy(LegacyEvent::executed(&transfer)));
		Ok(())
	}

	/// Revokes one of the caller's own authorizations.
	///
	/// The caller is implicitly the owner whose record is revoked; there is
	/// no third-party revocation and no operator gate. Revoking an
	/// already-revoked record is a no-op success; an executed record cannot
	/// be revoked.
	#[instrument(skip(self), fields(owner = %caller, legacy_id = %legacy_id))]
	pub async fn revoke_legacy(
		&self,
		caller: Address,
		legacy_id: U256,
	) -> Result<(), EngineError> {
		match self.ledger.revoke(caller, legacy_id).await? {
			RevokeOutcome::Revoked => {
				info!("legacy revoked");
				self.event_bus
					.publish(ProtocolEvent::Legacy(LegacyEvent::Revoked {
						owner: caller,
						legacy_id,
					}));
			}
			RevokeOutcome::AlreadyRevoked => {}
		}
		Ok(())
	}

	/// Whether the authorization has been finalized (executed or revoked).
	pub async fn is_legacy_revoked(
		&self,
		owner: Address,
		legacy_id: U256,
	) -> Result<bool, EngineError> {
		Ok(self.ledger.state_of(owner, legacy_id).await?.is_finalized())
	}

	/// Current lifecycle state of an authorization record.
	pub async fn authorization_state(
		&self,
		owner: Address,
		legacy_id: U256,
	) -> Result<AuthorizationState, EngineError> {
		Ok(self.ledger.state_of(owner, legacy_id).await?)
	}

	/// Grants the operator capability to `account`. Admin-gated.
	pub async fn add_operator(
		&self,
		caller: Address,
		account: Address,
	) -> Result<(), EngineError> {
		if self.access.add_operator(caller, account).await? {
			info!(account = %account, "operator granted");
			self.event_bus
				.publish(ProtocolEvent::Access(AccessEvent::OperatorGranted {
					account,
				}));
		}
		Ok(())
	}

	/// Removes the operator capability from `account`. Admin-gated.
	pub async fn remove_operator(
		&self,
		caller: Address,
		account: Address,
	) -> Result<(), EngineError> {
		if self.access.remove_operator(caller, account).await? {
			info!(account = %account, "operator revoked");
			self.event_bus
				.publish(ProtocolEvent::Access(AccessEvent::OperatorRevoked {
					account,
				}));
		}
		Ok(())
	}
}
