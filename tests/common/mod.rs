// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;
use walktally::application::Session;
use walktally::storage::{FileStore, KeyValueStore, RATES_KEY};

/// Helper to create a session backed by a rate file in a temporary directory
pub fn test_session() -> Result<(Session<FileStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let session = Session::open(FileStore::new(rates_path(&temp_dir)));
    Ok((session, temp_dir))
}

/// Helper to create a session whose rate file already holds `record`
pub fn session_with_record(record: &str) -> Result<(Session<FileStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let mut store = FileStore::new(rates_path(&temp_dir));
    store.set(RATES_KEY, record)?;
    Ok((Session::open(store), temp_dir))
}

/// Open a second session over the same rate file, as a restart would
pub fn reopen(temp_dir: &TempDir) -> Session<FileStore> {
    Session::open(FileStore::new(rates_path(temp_dir)))
}

pub fn rates_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("walktally.json")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
