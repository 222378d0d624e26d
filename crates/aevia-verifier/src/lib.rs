//! Typed-data verification for legacy authorizations.
//!
//! Recovering the signing account from a structured message is a pure
//! function of the domain descriptor, the payload fields and the signature.
//! This crate holds no state: it hashes the payload under the EIP-712 scheme
//! and recovers the secp256k1 signer from the resulting digest.
//!
//! The domain and the struct shape are both mixed into the digest, so a
//! signature is valid only for one engine instance, one chain and this exact
//! field layout. Replaying it against another contract, another chain or a
//! differently shaped struct changes the digest and recovery no longer
//! yields the declared owner.

use aevia_types::{
	utils::{compute_domain_hash, compute_final_digest, Eip712AbiEncoder, LEGACY_TYPE},
	LegacyTransfer, DOMAIN_NAME, DOMAIN_VERSION,
};
use alloy_primitives::{keccak256, Address, B256, PrimitiveSignature};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifierError {
	/// The signature is malformed, unrecoverable, or does not recover to
	/// the declared owner.
	#[error("invalid signature")]
	InvalidSignature,
}

/// EIP-712 domain descriptor of one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningDomain {
	/// Human-readable protocol name.
	pub name: String,
	/// Protocol release the signature is bound to.
	pub version: String,
	/// Chain the engine instance lives on.
	pub chain_id: u64,
	/// Address of the engine instance itself.
	pub verifying_contract: Address,
}

impl SigningDomain {
	/// Creates a domain with the protocol's default name and version.
	pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
		Self {
			name: DOMAIN_NAME.to_string(),
			version: DOMAIN_VERSION.to_string(),
			chain_id,
			verifying_contract,
		}
	}

	/// EIP-712 domain separator hash.
	pub fn domain_hash(&self) -> B256 {
		compute_domain_hash(
			&self.name,
			&self.version,
			self.chain_id,
			&self.verifying_contract,
		)
	}
}

/// EIP-712 hash of one `Legacy` struct instance.
///
/// Field order must match [`LEGACY_TYPE`] exactly.
pub fn legacy_struct_hash(transfer: &LegacyTransfer) -> B256 {
	let type_hash = keccak256(LEGACY_TYPE.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&type_hash);
	enc.push_u256(transfer.legacy_id);
	enc.push_u8(transfer.kind.as_u8());
	enc.push_address(&transfer.token);
	enc.push_u256(transfer.item_id);
	enc.push_u256(transfer.quantity);
	enc.push_address(&transfer.from);
	enc.push_address(&transfer.to);
	keccak256(enc.finish())
}

/// The digest an owner signs to authorize `transfer` under `domain`.
pub fn signing_digest(domain: &SigningDomain, transfer: &LegacyTransfer) -> B256 {
	compute_final_digest(&domain.domain_hash(), &legacy_struct_hash(transfer))
}

/// Recovers the account that produced `signature` over `digest`.
///
/// Expects a 65-byte `r || s || v` encoding; both the legacy 27/28 and the
/// raw 0/1 parity conventions are accepted.
pub fn recover_signer(digest: &B256, signature: &[u8]) -> Result<Address, VerifierError> {
	let signature =
		PrimitiveSignature::try_from(signature).map_err(|_| VerifierError::InvalidSignature)?;
	signature
		.recover_address_from_prehash(digest)
		.map_err(|_| VerifierError::InvalidSignature)
}

/// Checks that `signature` was produced by `transfer.from` over this exact
/// domain and payload.
pub fn verify_owner(
	domain: &SigningDomain,
	transfer: &LegacyTransfer,
	signature: &[u8],
) -> Result<(), VerifierError> {
	let recovered = recover_signer(&signing_digest(domain, transfer), signature)?;
	if recovered == transfer.from {
		Ok(())
	} else {
		Err(VerifierError::InvalidSignature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use aevia_types::AssetKind;
	use alloy_primitives::U256;
	use alloy_signer::SignerSync;
	use alloy_signer_local::PrivateKeySigner;

	fn sample_transfer(from: Address) -> LegacyTransfer {
		LegacyTransfer {
			legacy_id: U256::from(1u8),
			kind: AssetKind::Fungible,
			token: Address::repeat_byte(0x42),
			item_id: U256::ZERO,
			quantity: U256::from(100u8),
			from,
			to: Address::repeat_byte(0x99),
		}
	}

	fn sign(domain: &SigningDomain, transfer: &LegacyTransfer, signer: &PrivateKeySigner) -> Vec<u8> {
		let digest = signing_digest(domain, transfer);
		signer.sign_hash_sync(&digest).unwrap().as_bytes().to_vec()
	}

	#[test]
	fn recovers_the_signing_account() {
		let signer = PrivateKeySigner::random();
		let domain = SigningDomain::new(1, Address::repeat_byte(0x01));
		let transfer = sample_transfer(signer.address());

		let sig = sign(&domain, &transfer, &signer);
		assert_eq!(
			recover_signer(&signing_digest(&domain, &transfer), &sig).unwrap(),
			signer.address()
		);
		verify_owner(&domain, &transfer, &sig).unwrap();
	}

	#[test]
	fn rejects_a_signature_from_another_account() {
		let owner = PrivateKeySigner::random();
		let impostor = PrivateKeySigner::random();
		let domain = SigningDomain::new(1, Address::repeat_byte(0x01));
		let transfer = sample_transfer(owner.address());

		let sig = sign(&domain, &transfer, &impostor);
		assert_eq!(
			verify_owner(&domain, &transfer, &sig),
			Err(VerifierError::InvalidSignature)
		);
	}

	#[test]
	fn rejects_malformed_signatures() {
		let domain = SigningDomain::new(1, Address::repeat_byte(0x01));
		let transfer = sample_transfer(Address::repeat_byte(0x11));
		assert_eq!(
			verify_owner(&domain, &transfer, &[0u8; 10]),
			Err(VerifierError::InvalidSignature)
		);
		assert_eq!(
			verify_owner(&domain, &transfer, &[]),
			Err(VerifierError::InvalidSignature)
		);
	}

	#[test]
	fn any_field_change_invalidates_the_signature() {
		let signer = PrivateKeySigner::random();
		let domain = SigningDomain::new(1, Address::repeat_byte(0x01));
		let transfer = sample_transfer(signer.address());
		let sig = sign(&domain, &transfer, &signer);

		let mut tampered = transfer.clone();
		tampered.quantity = U256::from(101u8);
		assert_eq!(
			verify_owner(&domain, &tampered, &sig),
			Err(VerifierError::InvalidSignature)
		);

		let mut tampered = transfer.clone();
		tampered.to = Address::repeat_byte(0x77);
		assert_eq!(
			verify_owner(&domain, &tampered, &sig),
			Err(VerifierError::InvalidSignature)
		);

		let mut tampered = transfer.clone();
		tampered.kind = AssetKind::SemiFungible;
		assert_eq!(
			verify_owner(&domain, &tampered, &sig),
			Err(VerifierError::InvalidSignature)
		);
	}

	#[test]
	fn signature_is_bound_to_the_domain() {
		let signer = PrivateKeySigner::random();
		let domain = SigningDomain::new(1, Address::repeat_byte(0x01));
		let transfer = sample_transfer(signer.address());
		let sig = sign(&domain, &transfer, &signer);

		// Same fields, different chain.
		let other_chain = SigningDomain::new(2, Address::repeat_byte(0x01));
		assert_eq!(
			verify_owner(&other_chain, &transfer, &sig),
			Err(VerifierError::InvalidSignature)
		);

		// Same fields, different engine instance.
		let other_instance = SigningDomain::new(1, Address::repeat_byte(0x02));
		assert_eq!(
			verify_owner(&other_instance, &transfer, &sig),
			Err(VerifierError::InvalidSignature)
		);
	}

	#[test]
	fn type_strings_are_the_wire_contract() {
		// Pinned verbatim: interoperable signers reproduce these exact strings.
		assert_eq!(
			LEGACY_TYPE,
			"Legacy(uint256 legacyId,uint8 tokenType,address tokenAddress,uint256 tokenId,uint256 amount,address from,address to)"
		);
	}
}
