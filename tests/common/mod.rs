//! Test fixture utilities for integration tests.

pub mod harness;

use std::path::{Path, PathBuf};

/// Returns the path to the fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Returns the path to the fixture collection snapshot.
#[allow(dead_code)]
pub fn collection_snapshot() -> PathBuf {
    fixtures_dir().join("collection").join("snapshot.json")
}

/// Returns the path to an expected vault file by relative path.
#[allow(dead_code)]
pub fn expected_file(relative: &str) -> PathBuf {
    fixtures_dir().join("expected").join(relative)
}

/// Reads a fixture file and returns its contents as a string.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn read_fixture(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}
