//! Storage Module
//!
//! Persistent storage layer: one line-oriented text file.
//!
//! ## Responsibilities
//! - Parse the store file into an ordered sequence of records
//! - Maintain the derived key-presence set
//! - Append single records and rewrite the whole file
//! - Apply the durability barrier after every write
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ <encoded key>=<encoded value>\n        │
//! │ <encoded key>=<encoded value>\n        │
//! │ ... (one record per line)              │
//! └────────────────────────────────────────┘
//! ```
//!
//! No header, version marker or checksum. Keys and values use the
//! [`codec`](crate::codec) alphabet, which never contains `=` or `\n`.
//! A trailing empty line is tolerated on read.

mod file;
mod presence;
mod record;

pub use file::StoreFile;
pub use presence::PresenceSet;
pub use record::{parse_records, Record};

/// Separator between encoded key and encoded value
pub(crate) const DELIMITER: char = '=';

/// Record terminator
pub(crate) const TERMINATOR: char = '\n';
