//! Wires configuration into a runnable engine.

use crate::{AuthorizationEngine, EngineError, EventBus};
use aevia_access::AccessController;
use aevia_adapter::{AdapterRegistry, AssetAdapter};
use aevia_config::Config;
use aevia_ledger::implementations::{file::FileStore, memory::MemoryStore};
use aevia_ledger::{AuthorizationLedger, LedgerError, LedgerStore};
use aevia_verifier::SigningDomain;
use alloy_primitives::Address;
use std::sync::Arc;

/// Builder assembling an [`AuthorizationEngine`] from a [`Config`].
///
/// The configuration covers the signing domain, the role seeding and the
/// ledger backend; asset adapters are runtime capabilities and are
/// registered on the builder directly.
pub struct EngineBuilder {
	config: Config,
	adapters: AdapterRegistry,
}

impl EngineBuilder {
	/// Starts a builder for the given configuration.
	pub fn new(config: Config) -> Self {
		Self {
			config,
			adapters: AdapterRegistry::new(),
		}
	}

	/// Registers `adapter` as the asset ledger behind `token`.
	pub fn with_adapter(mut self, token: Address, adapter: Arc<dyn AssetAdapter>) -> Self {
		self.adapters.register(token, adapter);
		self
	}

	/// Builds the engine, instantiating the configured ledger backend.
	pub fn build(self) -> Result<AuthorizationEngine, EngineError> {
		let store: Box<dyn LedgerStore> = match self.config.ledger.backend.as_str() {
			"memory" => Box::new(MemoryStore::new()),
			"file" => {
				// Validated by Config: the file backend always carries a path.
				let path = self.config.ledger.path.as_ref().ok_or_else(|| {
					LedgerError::Backend("file backend configured without a path".to_string())
				})?;
				Box::new(FileStore::new(path)?)
			}
			other => {
				return Err(EngineError::Ledger(format!(
					"unknown ledger backend '{}'",
					other
				)))
			}
		};

		let domain = SigningDomain {
			name: self.config.protocol.name.clone(),
			version: self.config.protocol.version.clone(),
			chain_id: self.config.protocol.chain_id,
			verifying_contract: self.config.protocol.verifying_contract,
		};
		let access = AccessController::with_operators(
			self.config.access.admin,
			self.config.access.operators.iter().copied(),
		);

		Ok(AuthorizationEngine::new(
			domain,
			access,
			AuthorizationLedger::new(store),
			self.adapters,
			EventBus::default(),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_with_the_memory_backend() {
		let config: Config = r#"
			[protocol]
			chain_id = 1
			verifying_contract = "0x1111111111111111111111111111111111111111"

			[access]
			admin = "0x2222222222222222222222222222222222222222"
		"#
		.parse()
		.unwrap();

		let engine = EngineBuilder::new(config).build().unwrap();
		assert_eq!(engine.domain().chain_id, 1);
		assert_eq!(engine.domain().name, "AeviaProtocol");
	}

	#[test]
	fn builds_with_the_file_backend() {
		let dir = tempfile::tempdir().unwrap();
		let raw = format!(
			r#"
			[protocol]
			chain_id = 5
			verifying_contract = "0x1111111111111111111111111111111111111111"

			[access]
			admin = "0x2222222222222222222222222222222222222222"

			[ledger]
			backend = "file"
			path = "{}"
		"#,
			dir.path().display()
		);
		let config: Config = raw.parse().unwrap();
		EngineBuilder::new(config).build().unwrap();
	}
}
