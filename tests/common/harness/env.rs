//! Isolated test environment with temp directory.

use super::{TestCollection, VaultportCommand};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary workspace.
///
/// Creates a temp directory that is automatically cleaned up on drop. The
/// workspace holds an empty config file (so the user's real config is never
/// read), any snapshot written by the test, and the destination vault.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::write(root.join("config.toml"), "").expect("Failed to write config");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the empty config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Returns the path where exports are written.
    pub fn vault_dir(&self) -> PathBuf {
        self.root.join("vault")
    }

    /// Writes a collection as a snapshot plus payload files and returns the
    /// snapshot path.
    pub fn write_collection(&self, collection: &TestCollection) -> PathBuf {
        let blobs = self.root.join("blobs");
        std::fs::create_dir_all(&blobs).expect("Failed to create blobs dir");
        for (name, bytes) in collection.payloads() {
            std::fs::write(blobs.join(name), bytes).expect("Failed to write payload");
        }

        let path = self.root.join("snapshot.json");
        let json = serde_json::to_string_pretty(&collection.to_json())
            .expect("Failed to serialize snapshot");
        std::fs::write(&path, json).expect("Failed to write snapshot");
        path
    }

    /// Reads a file from the vault by relative path.
    pub fn read_vault_file(&self, relative: &str) -> String {
        let path = self.vault_dir().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Creates a VaultportCommand configured for this test environment.
    pub fn cmd(&self) -> VaultportCommand {
        VaultportCommand::new().config(&self.config_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir());
        assert!(env.config_path().is_file());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn write_collection_writes_snapshot_and_payloads() {
        let env = TestEnv::new();
        let collection = TestCollection::new()
            .notebook("f1", "Work", None)
            .resource("r1", Some("photo.png"), None, "r1.png", b"png");

        let snapshot = env.write_collection(&collection);
        assert!(snapshot.is_file());
        assert_eq!(std::fs::read(env.root().join("blobs/r1.png")).unwrap(), b"png");
    }
}
