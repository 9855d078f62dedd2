//! Configuration for LineKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a LineKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the store file (created on open if absent)
    pub path: PathBuf,

    /// Durability barrier applied after every append/rewrite
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Record Handling
    // -------------------------------------------------------------------------
    /// What to do with lines that carry no `=` delimiter
    pub parse_policy: ParsePolicy,

    /// How delete rewrites the whole file
    pub rewrite_strategy: RewriteStrategy,
}

/// Sync strategy: when to fsync the store file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append or rewrite (safe, slow)
    EveryWrite,

    /// Never fsync; data reaches the OS page cache only
    Never,
}

/// Handling of lines without a key/value delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Skip the line and keep loading
    Lenient,

    /// Fail the whole load with `MalformedRecord`
    Strict,
}

/// Full-file rewrite mechanism used by delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStrategy {
    /// Truncate the open file and write the surviving records into it
    InPlace,

    /// Write to `<path>.tmp`, fsync, then rename over the store file
    AtomicRename,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./linekv.db"),
            sync_strategy: SyncStrategy::EveryWrite,
            parse_policy: ParsePolicy::Lenient,
            rewrite_strategy: RewriteStrategy::InPlace,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config for the given store path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::builder().path(path).build()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the malformed-line policy
    pub fn parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.config.parse_policy = policy;
        self
    }

    /// Set the delete rewrite strategy
    pub fn rewrite_strategy(mut self, strategy: RewriteStrategy) -> Self {
        self.config.rewrite_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
