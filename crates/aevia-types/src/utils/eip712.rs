//! EIP-712 utilities for the legacy signing payload.
//!
//! These helpers provide:
//! - Domain hash computation (name, version, chain id, verifying contract)
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static field types of the payload

use alloy_primitives::{keccak256, Address, B256, U256};

/// Domain type string. The `version` field is part of the domain, so a
/// signature binds to a specific protocol release as well as to a chain and
/// a verifying contract.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Struct type of the signed payload. Field names, order and types are the
/// wire contract; changing any of them invalidates every outstanding
/// signature.
pub const LEGACY_TYPE: &str = "Legacy(uint256 legacyId,uint8 tokenType,address tokenAddress,uint256 tokenId,uint256 amount,address from,address to)";

/// Compute the EIP-712 domain hash
/// (keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))).
pub fn compute_domain_hash(
	name: &str,
	version: &str,
	chain_id: u64,
	verifying_contract: &Address,
) -> B256 {
	let domain_type_hash = keccak256(DOMAIN_TYPE.as_bytes());
	let name_hash = keccak256(name.as_bytes());
	let version_hash = keccak256(version.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash);
	enc.push_b256(&name_hash);
	enc.push_b256(&version_hash);
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for the static types used in struct hashing.
///
/// Every value occupies one 32-byte word; addresses and small integers are
/// left-padded with zeros.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u8(&mut self, v: u8) {
		let mut word = [0u8; 32];
		word[31] = v;
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn words_are_left_padded() {
		let addr = Address::repeat_byte(0x11);
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&addr);
		enc.push_u8(2);
		let buf = enc.finish();
		assert_eq!(buf.len(), 64);
		assert_eq!(&buf[..12], &[0u8; 12]);
		assert_eq!(&buf[12..32], addr.as_slice());
		assert_eq!(&buf[32..63], &[0u8; 31]);
		assert_eq!(buf[63], 2);
	}

	#[test]
	fn domain_hash_binds_every_field() {
		let contract = Address::repeat_byte(0x22);
		let base = compute_domain_hash("AeviaProtocol", "1.0.0", 1, &contract);
		assert_ne!(base, compute_domain_hash("Other", "1.0.0", 1, &contract));
		assert_ne!(base, compute_domain_hash("AeviaProtocol", "1.0.1", 1, &contract));
		assert_ne!(base, compute_domain_hash("AeviaProtocol", "1.0.0", 2, &contract));
		assert_ne!(
			base,
			compute_domain_hash("AeviaProtocol", "1.0.0", 1, &Address::repeat_byte(0x23))
		);
	}

	#[test]
	fn final_digest_is_prefixed() {
		// Recompute by hand to pin the 0x1901 framing.
		let domain = B256::repeat_byte(0x01);
		let strct = B256::repeat_byte(0x02);
		let mut raw = vec![0x19, 0x01];
		raw.extend_from_slice(domain.as_slice());
		raw.extend_from_slice(strct.as_slice());
		assert_eq!(compute_final_digest(&domain, &strct), keccak256(raw));
	}
}
