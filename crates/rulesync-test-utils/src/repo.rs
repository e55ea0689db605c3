//! [`TestRepo`]: a scratch project directory for on-disk sync tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project root. Paths given to the helpers are relative to it.
///
/// Helpers panic on I/O failure, so setup mistakes surface as test failures.
///
/// # Example
///
/// ```rust
/// use rulesync_test_utils::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.write(".rulesync/rules/a.md", "Body\n");
/// repo.assert_file_exists(".rulesync/rules/a.md");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap_or_else(|e| panic!("cannot create temp dir: {e}"));
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a string, ready for `SyncConfig::base_dirs`.
    pub fn base_dir(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Create or replace a file, making parent directories as needed.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.resolve(relative);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap_or_else(|e| panic!("mkdir {}: {e}", dir.display()));
        }
        fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.resolve(relative);
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
    }

    pub fn assert_file_exists(&self, relative: &str) {
        assert!(self.resolve(relative).is_file(), "missing file: {relative}");
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        assert!(!self.resolve(relative).exists(), "unexpected file: {relative}");
    }

    pub fn assert_file_contains(&self, relative: &str, needle: &str) {
        let content = self.read(relative);
        assert!(
            content.contains(needle),
            "{relative} lacks {needle:?}\n--- content ---\n{content}"
        );
    }
}
