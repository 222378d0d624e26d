//! Encoding and protocol-constant utilities shared across the engine.

pub mod constants;
pub mod eip712;

pub use constants::{DOMAIN_NAME, DOMAIN_VERSION};
pub use eip712::{
	compute_domain_hash, compute_final_digest, Eip712AbiEncoder, DOMAIN_TYPE, LEGACY_TYPE,
};
