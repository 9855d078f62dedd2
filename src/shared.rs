//! Shared Store
//!
//! Thread-safe wrapper around a single [`Store`].
//!
//! ## Concurrency Model
//! - One `parking_lot::Mutex` guards the handle
//! - Each call holds the lock for its whole read-modify-write cycle
//! - Clones share the same handle; closing one closes all of them
//!
//! Other processes opening the same path are not coordinated.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::engine::Store;
use crate::error::Result;

/// Cloneable, `Send + Sync` handle to one store
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wrap an already open store
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Open the store at `path` with default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Store::open(path).map(Self::new)
    }

    /// Open the store described by `config`
    pub fn open_with_config(config: Config) -> Result<Self> {
        Store::open_with_config(config).map(Self::new)
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        self.inner.lock().get(key)
    }

    pub fn get_string(&self, key: impl AsRef<[u8]>) -> Result<String> {
        self.inner.lock().get_string(key)
    }

    pub fn set(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<()> {
        self.inner.lock().delete(key)
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        self.inner.lock().contains(key)
    }

    pub fn keys(&self) -> Result<Vec<Vec<u8>>> {
        self.inner.lock().keys()
    }

    pub fn len(&self) -> Result<usize> {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.inner.lock().is_empty()
    }

    /// Close the underlying store for every clone
    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_closed()
    }

    /// Run several operations under one lock acquisition
    ///
    /// ```no_run
    /// # use linekv::{SharedStore, Result};
    /// # fn try_main(shared: SharedStore) -> Result<()> {
    /// let next = shared.with(|store| -> Result<u64> {
    ///     let current = match store.get_string("counter") {
    ///         Ok(text) => text.parse::<u64>().unwrap_or(0),
    ///         Err(e) if e.is_not_found() => 0,
    ///         Err(e) => return Err(e),
    ///     };
    ///     store.set("counter", (current + 1).to_string())?;
    ///     Ok(current + 1)
    /// })?;
    /// assert!(next > 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }
}
