//! Authorization lifecycle states and record keys.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a single `(owner, legacy_id)` authorization record.
///
/// Absent records are `Unused`. The only transitions are
/// `Unused -> Executed` and `Unused -> Revoked`; both targets are terminal
/// and a record is never deleted once written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
	/// The authorization has not been redeemed or revoked.
	#[default]
	Unused,
	/// The authorization was redeemed and its transfer performed.
	Executed,
	/// The owner withdrew the authorization before redemption.
	Revoked,
}

impl AuthorizationState {
	/// Whether the record has reached a terminal state.
	pub fn is_finalized(&self) -> bool {
		!matches!(self, AuthorizationState::Unused)
	}
}

impl fmt::Display for AuthorizationState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AuthorizationState::Unused => "unused",
			AuthorizationState::Executed => "executed",
			AuthorizationState::Revoked => "revoked",
		};
		f.write_str(s)
	}
}

/// Storage key of an authorization record.
///
/// The owner is part of the key: the same `legacy_id` under two different
/// owners addresses two completely independent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerKey {
	/// Account that signed the authorization.
	pub owner: Address,
	/// Owner-scoped authorization identifier.
	pub legacy_id: U256,
}

impl LedgerKey {
	/// Creates a key for the given owner and authorization id.
	pub fn new(owner: Address, legacy_id: U256) -> Self {
		Self { owner, legacy_id }
	}

	/// Canonical, filesystem-safe string form used by storage backends.
	pub fn storage_id(&self) -> String {
		format!("{:x}-{:x}", self.owner, self.legacy_id)
	}
}

impl fmt::Display for LedgerKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.owner, self.legacy_id)
	}
}
