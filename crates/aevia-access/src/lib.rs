//! Role management for the Aevia authorization engine.
//!
//! Two-tier capability model: a single administrative account fixed at
//! construction, and a mutable set of operator accounts authorized to redeem
//! authorizations. Admin and operator are independent boolean capabilities
//! on an account, not a hierarchy; only the admin may change operator
//! membership.

use alloy_primitives::Address;
use std::collections::HashSet;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during role operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
	/// Caller lacks the role the operation requires.
	#[error("caller {0} is not authorized")]
	Unauthorized(Address),
}

/// Capability set gating engine operations.
///
/// An empty operator set is valid: no one can redeem authorizations, but
/// revocation still works since it is owner-initiated, not operator-gated.
pub struct AccessController {
	admin: Address,
	operators: RwLock<HashSet<Address>>,
}

impl AccessController {
	/// Creates a controller with the given admin and no operators.
	pub fn new(admin: Address) -> Self {
		Self {
			admin,
			operators: RwLock::new(HashSet::new()),
		}
	}

	/// Creates a controller pre-seeded with operators (configuration path).
	pub fn with_operators(admin: Address, operators: impl IntoIterator<Item = Address>) -> Self {
		Self {
			admin,
			operators: RwLock::new(operators.into_iter().collect()),
		}
	}

	/// The administrative account. Immutable for the controller's lifetime.
	pub fn admin(&self) -> Address {
		self.admin
	}

	/// Whether `account` holds the administrative capability.
	pub fn is_admin(&self, account: Address) -> bool {
		account == self.admin
	}

	/// Whether `account` holds the operator capability.
	pub async fn is_operator(&self, account: Address) -> bool {
		self.operators.read().await.contains(&account)
	}

	/// Grants the operator capability to `account`.
	///
	/// Only the admin may call this. Granting an existing operator is a
	/// no-op success. Returns whether membership actually changed, so the
	/// caller can emit a role-change record only on change.
	pub async fn add_operator(&self, caller: Address, account: Address) -> Result<bool, AccessError> {
		if !self.is_admin(caller) {
			return Err(AccessError::Unauthorized(caller));
		}
		Ok(self.operators.write().await.insert(account))
	}

	/// Removes the operator capability from `account`.
	///
	/// Symmetric to [`add_operator`](Self::add_operator): admin-gated and
	/// idempotent.
	pub async fn remove_operator(
		&self,
		caller: Address,
		account: Address,
	) -> Result<bool, AccessError> {
		if !self.is_admin(caller) {
			return Err(AccessError::Unauthorized(caller));
		}
		Ok(self.operators.write().await.remove(&account))
	}
}
