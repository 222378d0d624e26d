//! Common types for the Aevia authorization engine.
//!
//! This crate defines the core data types shared by every component of the
//! engine: asset kinds, the signed transfer payload, authorization lifecycle
//! states and the records emitted for external auditing. It also carries the
//! EIP-712 encoding utilities the signature layer is built on.

/// Asset kinds and the signed transfer payload.
pub mod asset;
/// Records emitted by the engine for external auditing.
pub mod events;
/// Authorization lifecycle states and record keys.
pub mod state;
/// Encoding and protocol-constant utilities.
pub mod utils;

// Re-export all types for convenient access
pub use asset::*;
pub use events::*;
pub use state::*;
pub use utils::{DOMAIN_NAME, DOMAIN_VERSION};
