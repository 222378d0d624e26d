//! Kind-specific parameter rules, checked before any state change.

use aevia_types::AssetKind;
use alloy_primitives::U256;
use thiserror::Error;

/// A violated transfer-parameter rule.
///
/// Carried inside [`EngineError::InvalidParameters`](crate::EngineError) so
/// operators can see which rule a rejected request broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterViolation {
	/// Fungible transfers carry no item; the id must be the zero sentinel.
	#[error("fungible transfers must use the zero item id")]
	FungibleItemId,
	/// Unique items move whole; the quantity must be exactly 1.
	#[error("unique transfers must have a quantity of exactly 1")]
	UniqueQuantity,
	/// Nothing to transfer.
	#[error("quantity must be greater than zero")]
	ZeroQuantity,
}

/// Validates `(kind, item_id, quantity)` against the per-kind rules.
///
/// Side-effect free; runs before the ledger is touched or the adapter is
/// invoked, so a violation leaves no observable partial execution.
pub fn validate_transfer(
	kind: AssetKind,
	item_id: U256,
	quantity: U256,
) -> Result<(), ParameterViolation> {
	match kind {
		AssetKind::Fungible => {
			if !item_id.is_zero() {
				return Err(ParameterViolation::FungibleItemId);
			}
			if quantity.is_zero() {
				return Err(ParameterViolation::ZeroQuantity);
			}
		}
		AssetKind::Unique => {
			if quantity != U256::from(1u8) {
				return Err(ParameterViolation::UniqueQuantity);
			}
		}
		AssetKind::SemiFungible => {
			if quantity.is_zero() {
				return Err(ParameterViolation::ZeroQuantity);
			}
		}
	}
	Ok(())
}
