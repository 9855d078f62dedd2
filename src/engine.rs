//! Engine Module
//!
//! The storage handle that coordinates codec, records and the store file.
//!
//! ## Responsibilities
//! - Own the open store file for the handle's lifetime
//! - Rebuild the presence set from the file on every operation
//! - Keep at most one record per key (delete-then-append on set)
//! - Apply the durability barrier after every mutation

use std::collections::HashSet;
use std::path::Path;

use crate::codec;
use crate::config::Config;
use crate::error::{LineKvError, Result};
use crate::storage::{parse_records, PresenceSet, Record, StoreFile};

/// Handle on a single-file key-value store
///
/// ## Consistency Model
///
/// The file is the only source of truth. Every call re-reads it completely
/// and rebuilds the presence set before trusting it, so state left by a
/// previous process is always picked up. Nothing coordinates two handles on
/// the same path; wrap a handle in [`SharedStore`](crate::SharedStore) to
/// share it between threads.
///
/// Methods take `&mut self`: one operation at a time per handle.
///
/// ```no_run
/// # use linekv::{Store, Result};
/// # fn try_main() -> Result<()> {
/// let mut store = Store::open("data.kv")?;
/// store.set("key", "value")?;
/// assert_eq!(store.get("key")?, b"value".to_vec());
/// store.close()?;
/// # Ok(())
/// # }
/// ```
pub struct Store {
    /// Store configuration
    config: Config,

    /// Open store file; `None` once closed
    file: Option<StoreFile>,

    /// Derived set of encoded keys present in the file
    presence: PresenceSet,
}

impl Store {
    /// Open (creating if absent) the store at `path` with default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(Config::with_path(path.as_ref()))
    }

    /// Open the store described by `config`
    ///
    /// The file is not read yet; the presence set is filled lazily by the
    /// first operation.
    pub fn open_with_config(config: Config) -> Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(LineKvError::Config("store path is empty".to_string()));
        }

        let file = StoreFile::open(&config.path, config.sync_strategy)?;
        tracing::info!("Opened store at {}", config.path.display());

        Ok(Self {
            config,
            file: Some(file),
            presence: PresenceSet::new(),
        })
    }

    /// Get the value stored under `key`
    ///
    /// Returns `KeyNotFound` if the key is absent.
    pub fn get(&mut self, key: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let encoded_key = codec::encode(key);
        let records = self.load_records()?;

        // Fast path: skip the scan for keys the file does not hold
        if !self.presence.contains(&encoded_key) {
            tracing::debug!("get {}: not present", encoded_key);
            return Err(LineKvError::KeyNotFound);
        }

        match records.iter().find(|r| r.key == encoded_key) {
            Some(record) => {
                tracing::debug!("get {}: found", encoded_key);
                record.decode_value()
            }
            None => {
                tracing::warn!(
                    "get {}: presence set and file disagree, treating as not found",
                    encoded_key
                );
                Err(LineKvError::KeyNotFound)
            }
        }
    }

    /// Get the value stored under `key` as UTF-8 text
    pub fn get_string(&mut self, key: impl AsRef<[u8]>) -> Result<String> {
        let value = self.get(key)?;
        String::from_utf8(value)
            .map_err(|e| LineKvError::Decode(format!("value is not UTF-8: {}", e)))
    }

    /// Store `value` under `key`, replacing any previous value
    ///
    /// An existing record is removed by a full delete before the new one is
    /// appended, even when the value is unchanged.
    pub fn set(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let record = Record::new(key, value);
        let records = self.load_records()?;

        if records.iter().any(|r| r.key == record.key) {
            tracing::debug!("set {}: replacing existing record", record.key);
            self.delete_encoded(&record.key)?;
        }

        self.file_mut()?.append(&record)?;
        tracing::debug!("set {}: appended", record.key);

        self.presence.insert(record.key);
        Ok(())
    }

    /// Remove `key` from the store
    ///
    /// Succeeds whether or not the key exists.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
        let encoded_key = codec::encode(key);
        self.delete_encoded(&encoded_key)
    }

    /// Check whether `key` is present
    pub fn contains(&mut self, key: impl AsRef<[u8]>) -> Result<bool> {
        let encoded_key = codec::encode(key);
        self.load_records()?;
        Ok(self.presence.contains(&encoded_key))
    }

    /// All keys in file order
    ///
    /// Fails with `Decode` if any stored key is not valid encoded text.
    pub fn keys(&mut self) -> Result<Vec<Vec<u8>>> {
        let records = self.load_records()?;
        let mut seen = HashSet::new();

        records
            .iter()
            .filter(|r| seen.insert(r.key.as_str()))
            .map(Record::decode_key)
            .collect()
    }

    /// Number of distinct keys in the file
    pub fn len(&mut self) -> Result<usize> {
        self.load_records()?;
        Ok(self.presence.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Close the store
    ///
    /// Applies a final durability barrier and releases the file. Every later
    /// call, including another `close`, fails with `ClosedHandle`.
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(LineKvError::ClosedHandle)?;
        self.presence.clear();

        file.close()?;
        tracing::info!("Closed store at {}", self.config.path.display());
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Presence set as of the last operation
    pub fn presence(&self) -> &PresenceSet {
        &self.presence
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn file_mut(&mut self) -> Result<&mut StoreFile> {
        self.file.as_mut().ok_or(LineKvError::ClosedHandle)
    }

    /// Read the whole file and rebuild the presence set from it
    fn load_records(&mut self) -> Result<Vec<Record>> {
        let policy = self.config.parse_policy;
        let content = self.file_mut()?.read_all()?;
        let records = parse_records(&content, policy)?;

        self.presence.rebuild(&records);
        tracing::trace!("Loaded {} records", records.len());

        Ok(records)
    }

    /// Drop every record for `encoded_key` and rewrite the file
    fn delete_encoded(&mut self, encoded_key: &str) -> Result<()> {
        self.presence.remove(encoded_key);

        let mut records = self.load_records()?;
        let before = records.len();
        records.retain(|r| r.key != encoded_key);

        let strategy = self.config.rewrite_strategy;
        self.file_mut()?.rewrite(&records, strategy)?;
        tracing::debug!(
            "delete {}: removed {} record(s)",
            encoded_key,
            before - records.len()
        );

        self.presence.rebuild(&records);
        Ok(())
    }
}
