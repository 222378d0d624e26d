//! Configuration for an Aevia engine instance.
//!
//! Loads TOML configuration and validates it before any component is
//! constructed. A config names the signing domain of the instance (chain id
//! plus verifying contract, with the protocol name and version defaulted),
//! seeds the role model, and selects the ledger backend.
//!
//! ```toml
//! [protocol]
//! chain_id = 1
//! verifying_contract = "0x000000000000000000000000000000000000aef1"
//!
//! [access]
//! admin = "0x..."
//! operators = ["0x..."]
//!
//! [ledger]
//! backend = "file"
//! path = "/var/lib/aevia/ledger"
//! ```

use aevia_types::{DOMAIN_NAME, DOMAIN_VERSION};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.to_string())
	}
}

/// Main configuration structure for one engine instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Signing-domain parameters of the instance.
	pub protocol: ProtocolConfig,
	/// Role seeding: admin account and initial operators.
	pub access: AccessConfig,
	/// Ledger backend selection.
	#[serde(default)]
	pub ledger: LedgerConfig,
}

/// Signing-domain parameters.
///
/// `name` and `version` default to the protocol constants; overriding them
/// changes the domain separator and therefore which signatures verify.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProtocolConfig {
	#[serde(default = "default_domain_name")]
	pub name: String,
	#[serde(default = "default_domain_version")]
	pub version: String,
	/// Chain the engine instance is bound to.
	pub chain_id: u64,
	/// Address of the engine instance itself.
	pub verifying_contract: Address,
}

/// Role seeding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
	/// The single administrative account.
	pub admin: Address,
	/// Accounts granted the operator capability at startup.
	#[serde(default)]
	pub operators: Vec<Address>,
}

/// Ledger backend selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
	/// Backend name: "memory" or "file".
	#[serde(default = "default_ledger_backend")]
	pub backend: String,
	/// Record directory; required by the file backend.
	pub path: Option<PathBuf>,
}

impl Default for LedgerConfig {
	fn default() -> Self {
		Self {
			backend: default_ledger_backend(),
			path: None,
		}
	}
}

fn default_domain_name() -> String {
	DOMAIN_NAME.to_string()
}

fn default_domain_version() -> String {
	DOMAIN_VERSION.to_string()
}

fn default_ledger_backend() -> String {
	"memory".to_string()
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		std::fs::read_to_string(path)?.parse()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.protocol.chain_id == 0 {
			return Err(ConfigError::Validation(
				"protocol.chain_id must be non-zero".to_string(),
			));
		}
		if self.protocol.verifying_contract == Address::ZERO {
			return Err(ConfigError::Validation(
				"protocol.verifying_contract must be set".to_string(),
			));
		}
		if self.access.admin == Address::ZERO {
			return Err(ConfigError::Validation(
				"access.admin must be set".to_string(),
			));
		}
		match self.ledger.backend.as_str() {
			"memory" => Ok(()),
			"file" => {
				if self.ledger.path.is_none() {
					return Err(ConfigError::Validation(
						"ledger.path is required for the file backend".to_string(),
					));
				}
				Ok(())
			}
			other => Err(ConfigError::Validation(format!(
				"unknown ledger backend '{}'",
				other
			))),
		}
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
		[protocol]
		chain_id = 1
		verifying_contract = "0x1111111111111111111111111111111111111111"

		[access]
		admin = "0x2222222222222222222222222222222222222222"
	"#;

	#[test]
	fn minimal_config_uses_defaults() {
		let config: Config = MINIMAL.parse().unwrap();
		assert_eq!(config.protocol.name, DOMAIN_NAME);
		assert_eq!(config.protocol.version, DOMAIN_VERSION);
		assert_eq!(config.ledger.backend, "memory");
		assert!(config.access.operators.is_empty());
	}

	#[test]
	fn file_backend_requires_a_path() {
		let raw = format!("{}\n[ledger]\nbackend = \"file\"\n", MINIMAL);
		assert!(matches!(
			raw.parse::<Config>(),
			Err(ConfigError::Validation(_))
		));

		let raw = format!(
			"{}\n[ledger]\nbackend = \"file\"\npath = \"/tmp/aevia\"\n",
			MINIMAL
		);
		raw.parse::<Config>().unwrap();
	}

	#[test]
	fn unknown_backend_is_rejected() {
		let raw = format!("{}\n[ledger]\nbackend = \"sqlite\"\n", MINIMAL);
		assert!(matches!(
			raw.parse::<Config>(),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn zero_admin_is_rejected() {
		let raw = r#"
			[protocol]
			chain_id = 1
			verifying_contract = "0x1111111111111111111111111111111111111111"

			[access]
			admin = "0x0000000000000000000000000000000000000000"
		"#;
		assert!(matches!(
			raw.parse::<Config>(),
			Err(ConfigError::Validation(_))
		));
	}
}
