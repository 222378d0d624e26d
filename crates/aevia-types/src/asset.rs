//! Asset kinds and the signed transfer payload.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of asset ledger a transfer operates on.
///
/// The discriminants are part of the wire contract: the signed payload
/// carries the kind as a `uint8` with exactly these values, so reordering
/// the variants would invalidate every outstanding signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
	/// Interchangeable units drawn from a single balance.
	Fungible,
	/// A one-of-a-kind item identified by its item id.
	Unique,
	/// Countable units of a specific item type.
	SemiFungible,
}

impl AssetKind {
	/// Wire encoding used inside the signed struct.
	pub fn as_u8(&self) -> u8 {
		match self {
			AssetKind::Fungible => 0,
			AssetKind::Unique => 1,
			AssetKind::SemiFungible => 2,
		}
	}
}

/// Error returned when decoding an out-of-range asset kind byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown asset kind: {0}")]
pub struct UnknownAssetKind(pub u8);

impl TryFrom<u8> for AssetKind {
	type Error = UnknownAssetKind;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(AssetKind::Fungible),
			1 => Ok(AssetKind::Unique),
			2 => Ok(AssetKind::SemiFungible),
			other => Err(UnknownAssetKind(other)),
		}
	}
}

/// A fully specified one-time transfer, as signed by its owner.
///
/// Field order mirrors the `Legacy` struct of the signing payload. `from` is
/// the owner whose signature authorizes the transfer and whose asset the
/// engine moves; `legacy_id` is scoped to that owner, not globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTransfer {
	/// Owner-scoped identifier chosen by the owner.
	pub legacy_id: U256,
	/// Which asset-ledger semantics apply to the transfer.
	pub kind: AssetKind,
	/// Asset contract the transfer operates on.
	pub token: Address,
	/// Item within the ledger; the zero sentinel for fungible transfers.
	pub item_id: U256,
	/// Amount to move.
	pub quantity: U256,
	/// Owner and signer of the authorization.
	pub from: Address,
	/// Recipient of the transfer.
	pub to: Address,
}
