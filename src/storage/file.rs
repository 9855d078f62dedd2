//! Store file
//!
//! Owns the open file handle and implements the raw I/O primitives:
//! read everything, append one record, rewrite all records.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::{RewriteStrategy, SyncStrategy};
use crate::error::Result;

use super::Record;

/// Suffix of the scratch file used by atomic rewrites
const TEMP_SUFFIX: &str = ".tmp";

/// Exclusive handle on the store file
pub struct StoreFile {
    /// Path of the store file
    path: PathBuf,
    /// Read/write handle; replaced after an atomic rewrite
    file: File,
    /// Durability barrier policy
    sync_strategy: SyncStrategy,
}

impl StoreFile {
    /// Open (creating if absent) the store file for read/write
    ///
    /// Content is not read here.
    pub fn open(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = Self::open_handle(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sync_strategy,
        })
    }

    /// Read the full file content from the start
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        self.file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Append one record at end of file, then apply the durability barrier
    pub fn append(&mut self, record: &Record) -> Result<()> {
        self.file.seek(SeekFrom::End(0))?;
        record.write_to(&mut self.file)?;
        self.sync()
    }

    /// Replace the whole file content with `records`
    pub fn rewrite(&mut self, records: &[Record], strategy: RewriteStrategy) -> Result<()> {
        match strategy {
            RewriteStrategy::InPlace => self.rewrite_in_place(records),
            RewriteStrategy::AtomicRename => self.rewrite_atomic(records),
        }
    }

    /// Durability barrier, honoring the sync strategy
    pub fn sync(&mut self) -> Result<()> {
        if self.sync_strategy == SyncStrategy::EveryWrite {
            self.file.sync_all()?;
        }
        Ok(())
    }

    /// Final barrier, then release the handle
    pub fn close(mut self) -> Result<()> {
        self.sync()?;
        drop(self.file);
        Ok(())
    }

    /// Current size of the file in bytes
    pub fn size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the scratch file used by atomic rewrites
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Create-capable options; new files are owner-only on unix
    fn owner_only_options() -> OpenOptions {
        let mut options = OpenOptions::new();
        options.write(true).create(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options
    }

    fn open_handle(path: &Path) -> Result<File> {
        Ok(Self::owner_only_options().read(true).open(path)?)
    }

    /// Truncate and refill the open file
    ///
    /// A failure between truncation and the final write leaves the file
    /// short; `AtomicRename` avoids that.
    fn rewrite_in_place(&mut self, records: &[Record]) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;

        {
            let mut writer = BufWriter::new(&mut self.file);
            for record in records {
                record.write_to(&mut writer)?;
            }
            writer.flush()?;
        }

        self.sync()
    }

    /// Write a scratch file, then rename it over the store file
    fn rewrite_atomic(&mut self, records: &[Record]) -> Result<()> {
        let temp_path = self.temp_path();

        {
            // Drop leftovers from an earlier failed rewrite so the mode applies
            match fs::remove_file(&temp_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }

            let temp = Self::owner_only_options()
                .truncate(true)
                .open(&temp_path)?;

            let mut writer = BufWriter::new(temp);
            for record in records {
                record.write_to(&mut writer)?;
            }
            let temp = writer.into_inner().map_err(|e| e.into_error())?;

            if self.sync_strategy == SyncStrategy::EveryWrite {
                temp.sync_all()?;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!(
                    "Failed to remove {} after rename error: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(e.into());
        }

        #[cfg(unix)]
        {
            let dir = match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            if let Err(e) = File::open(dir).and_then(|handle| handle.sync_all()) {
                tracing::warn!("Failed to sync directory {}: {}", dir.display(), e);
            }
        }

        // The old handle still points at the replaced inode
        self.file = Self::open_handle(&self.path)?;
        Ok(())
    }
}
