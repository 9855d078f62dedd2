//! Tests for StoreFile
//!
//! These tests verify:
//! - File creation on open
//! - Appending records
//! - In-place and atomic full rewrites
//! - Release on close

use std::fs;
use std::path::PathBuf;

use linekv::storage::{Record, StoreFile};
use linekv::{RewriteStrategy, SyncStrategy};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.kv");
    (temp_dir, path)
}

fn sample_records() -> Vec<Record> {
    vec![Record::new("a", "1"), Record::new("b", "2"), Record::new("c", "3")]
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let (_temp, path) = setup_temp_file();
    assert!(!path.exists());

    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();

    assert!(path.exists());
    assert_eq!(file.size().unwrap(), 0);
    assert!(file.read_all().unwrap().is_empty());
}

#[test]
fn test_open_keeps_existing_content() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "YQ=MQ\n").unwrap();

    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();

    assert_eq!(file.read_all().unwrap(), b"YQ=MQ\n".to_vec());
}

#[test]
fn test_open_missing_directory_fails() {
    let (_temp, path) = setup_temp_file();
    let path = path.join("nested").join("store.kv");

    assert!(StoreFile::open(&path, SyncStrategy::EveryWrite).is_err());
}

#[cfg(unix)]
#[test]
fn test_open_sets_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, path) = setup_temp_file();
    let _file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn test_rewrite_atomic_keeps_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    file.append(&Record::new("a", "1")).unwrap();

    // A stale scratch file with a wider mode must not leak into the store
    fs::write(file.temp_path(), "stale\n").unwrap();
    fs::set_permissions(file.temp_path(), fs::Permissions::from_mode(0o644)).unwrap();

    file.rewrite(&[Record::new("b", "2")], RewriteStrategy::AtomicRename)
        .unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(fs::read_to_string(&path).unwrap(), "Yg=Mg\n");
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_records() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();

    for record in sample_records() {
        file.append(&record).unwrap();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), "YQ=MQ\nYg=Mg\nYw=Mw\n");
}

#[test]
fn test_append_after_read_goes_to_end() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::Never).unwrap();

    file.append(&Record::new("a", "1")).unwrap();
    file.read_all().unwrap();
    file.append(&Record::new("b", "2")).unwrap();

    assert_eq!(file.read_all().unwrap(), b"YQ=MQ\nYg=Mg\n".to_vec());
}

// =============================================================================
// Rewrite Tests
// =============================================================================

#[test]
fn test_rewrite_in_place_shrinks_file() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    for record in sample_records() {
        file.append(&record).unwrap();
    }

    file.rewrite(&[Record::new("b", "2")], RewriteStrategy::InPlace)
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Yg=Mg\n");
    assert_eq!(file.size().unwrap(), 6);
}

#[test]
fn test_rewrite_to_empty() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    file.append(&Record::new("a", "1")).unwrap();

    file.rewrite(&[], RewriteStrategy::InPlace).unwrap();

    assert!(file.read_all().unwrap().is_empty());
}

#[test]
fn test_rewrite_atomic_replaces_file() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    for record in sample_records() {
        file.append(&record).unwrap();
    }

    file.rewrite(&[Record::new("c", "3")], RewriteStrategy::AtomicRename)
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Yw=Mw\n");
    assert!(!file.temp_path().exists());
}

#[test]
fn test_rewrite_atomic_then_append_uses_new_file() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    file.append(&Record::new("a", "1")).unwrap();

    file.rewrite(&[], RewriteStrategy::AtomicRename).unwrap();
    file.append(&Record::new("b", "2")).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Yg=Mg\n");
    assert_eq!(file.read_all().unwrap(), b"Yg=Mg\n".to_vec());
}

#[cfg(unix)]
#[test]
fn test_rewrite_atomic_rename_failure_removes_temp() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();

    // A non-empty directory at the store path makes the rename fail
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupied"), "x").unwrap();

    let result = file.rewrite(&[Record::new("a", "1")], RewriteStrategy::AtomicRename);

    assert!(result.is_err());
    assert!(!file.temp_path().exists());
}

#[test]
fn test_temp_path_is_sibling() {
    let (_temp, path) = setup_temp_file();
    let file = StoreFile::open(&path, SyncStrategy::Never).unwrap();

    assert_eq!(file.temp_path(), path.with_file_name("store.kv.tmp"));
    assert_eq!(file.path(), path.as_path());
}

// =============================================================================
// Close Tests
// =============================================================================

#[test]
fn test_close_keeps_data() {
    let (_temp, path) = setup_temp_file();
    let mut file = StoreFile::open(&path, SyncStrategy::EveryWrite).unwrap();
    file.append(&Record::new("a", "1")).unwrap();

    file.close().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "YQ=MQ\n");
}
