//! File-backed ledger backend.
//!
//! Persists one JSON record per authorization key under a dedicated
//! directory, so the audit trail survives restarts. Writes go through a
//! temporary file followed by a rename, and the directory carries an
//! advisory lock so two processes cannot serve the same ledger at once.

use crate::{LedgerError, LedgerStore};
use aevia_types::{AuthorizationState, LedgerKey};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed ledger store.
pub struct FileStore {
	dir: PathBuf,
	// Held for the lifetime of the store; releases the advisory lock on drop.
	_dir_lock: File,
}

impl FileStore {
	/// Opens (creating if necessary) a ledger directory.
	///
	/// Fails if another store instance already holds the directory lock.
	pub fn new(dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
		let dir = dir.as_ref().to_path_buf();
		std::fs::create_dir_all(&dir)
			.map_err(|e| LedgerError::Backend(format!("cannot create ledger dir: {}", e)))?;

		let lock_path = dir.join(".lock");
		let dir_lock = OpenOptions::new()
			.create(true)
			.truncate(false)
			.write(true)
			.open(&lock_path)
			.map_err(|e| LedgerError::Backend(format!("cannot open lock file: {}", e)))?;
		dir_lock.try_lock_exclusive().map_err(|_| {
			LedgerError::Backend(format!(
				"ledger directory {} is locked by another instance",
				dir.display()
			))
		})?;

		Ok(Self {
			dir,
			_dir_lock: dir_lock,
		})
	}

	fn record_path(&self, key: &LedgerKey) -> PathBuf {
		self.dir.join(format!("{}.json", key.storage_id()))
	}
}

#[async_trait]
impl LedgerStore for FileStore {
	async fn load(&self, key: &LedgerKey) -> Result<Option<AuthorizationState>, LedgerError> {
		match fs::read(self.record_path(key)).await {
			Ok(bytes) => {
				let state = serde_json::from_slice(&bytes)
					.map_err(|e| LedgerError::Serialization(e.to_string()))?;
				Ok(Some(state))
			}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(LedgerError::Backend(e.to_string())),
		}
	}

	async fn store(&self, key: &LedgerKey, state: AuthorizationState) -> Result<(), LedgerError> {
		let bytes =
			serde_json::to_vec(&state).map_err(|e| LedgerError::Serialization(e.to_string()))?;

		let path = self.record_path(key);
		let tmp = path.with_extension("json.tmp");
		fs::write(&tmp, bytes)
			.await
			.map_err(|e| LedgerError::Backend(e.to_string()))?;
		fs::rename(&tmp, &path)
			.await
			.map_err(|e| LedgerError::Backend(e.to_string()))?;
		Ok(())
	}
}
