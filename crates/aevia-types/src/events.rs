//! Records emitted by the engine for external auditing.
//!
//! Every successful state transition produces a record: executed and revoked
//! authorizations, and operator membership changes. Records flow through the
//! engine's event bus; consumers (indexers, monitors) subscribe to them and
//! are outside the scope of this workspace.

use crate::{AssetKind, LegacyTransfer};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Main record type encompassing everything the engine emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProtocolEvent {
	/// Authorization lifecycle records.
	Legacy(LegacyEvent),
	/// Role membership records.
	Access(AccessEvent),
}

/// Lifecycle records for individual authorizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegacyEvent {
	/// An authorization was redeemed and its transfer performed.
	Executed {
		legacy_id: U256,
		kind: AssetKind,
		token: Address,
		item_id: U256,
		quantity: U256,
		from: Address,
		to: Address,
	},
	/// An owner revoked one of its own authorizations.
	Revoked { owner: Address, legacy_id: U256 },
}

impl LegacyEvent {
	/// Builds the execution record for a completed transfer.
	pub fn executed(transfer: &LegacyTransfer) -> Self {
		LegacyEvent::Executed {
			legacy_id: transfer.legacy_id,
			kind: transfer.kind,
			token: transfer.token,
			item_id: transfer.item_id,
			quantity: transfer.quantity,
			from: transfer.from,
			to: transfer.to,
		}
	}
}

/// Role membership change records.
///
/// Emitted only when membership actually changes; idempotent re-grants and
/// re-removals produce no record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessEvent {
	/// An account was granted the operator capability.
	OperatorGranted { account: Address },
	/// An account lost the operator capability.
	OperatorRevoked { account: Address },
}
