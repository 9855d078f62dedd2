//! Record model
//!
//! A record is one `<encoded key>=<encoded value>` line of the store file.

use std::io::Write;

use crate::codec;
use crate::config::ParsePolicy;
use crate::error::{LineKvError, Result};

use super::{DELIMITER, TERMINATOR};

/// One key/value entry, held in encoded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Encoded key (text before the first `=`)
    pub key: String,
    /// Encoded value (text after the first `=`)
    pub value: String,
}

impl Record {
    /// Build a record from raw key and value bytes
    pub fn new(key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Self {
        Self {
            key: codec::encode(key),
            value: codec::encode(value),
        }
    }

    /// Build a record from already encoded parts
    pub fn from_encoded(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Split a line at its first `=`
    ///
    /// Returns `None` when the line has no delimiter. The value side is kept
    /// verbatim; a stray `=` inside it surfaces later as a decode failure.
    pub fn parse_line(line: &str) -> Option<Self> {
        line.split_once(DELIMITER)
            .map(|(key, value)| Self::from_encoded(key, value))
    }

    /// Serialized form, newline included
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(self.key.len() + self.value.len() + 2);
        line.push_str(&self.key);
        line.push(DELIMITER);
        line.push_str(&self.value);
        line.push(TERMINATOR);
        line
    }

    /// Write the serialized line to `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.to_line().as_bytes())
    }

    /// Decode the raw key bytes
    pub fn decode_key(&self) -> Result<Vec<u8>> {
        codec::decode(&self.key)
    }

    /// Decode the raw value bytes
    pub fn decode_value(&self) -> Result<Vec<u8>> {
        codec::decode(&self.value)
    }
}

/// Parse the full content of a store file into records, in file order
///
/// Content that is not UTF-8 is converted lossily: such bytes can never be
/// part of a valid encoding, so they only affect the line they sit on. The
/// replacement is not reversible; the next full rewrite stores U+FFFD in
/// place of the original bytes, and that record keeps failing to decode.
/// Empty lines (including the segment after the final `\n`) are ignored
/// under both policies.
pub fn parse_records(content: &[u8], policy: ParsePolicy) -> Result<Vec<Record>> {
    let text = String::from_utf8_lossy(content);
    let mut records = Vec::new();

    for (idx, line) in text.split(TERMINATOR).enumerate() {
        if line.is_empty() {
            continue;
        }

        match Record::parse_line(line) {
            Some(record) => records.push(record),
            None => match policy {
                ParsePolicy::Lenient => {
                    tracing::warn!("Skipping malformed record at line {}", idx + 1);
                }
                ParsePolicy::Strict => {
                    return Err(LineKvError::MalformedRecord { line: idx + 1 });
                }
            },
        }
    }

    Ok(records)
}
