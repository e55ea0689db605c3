//! Where an entity lives on disk

use rulesync_fs::NormalizedPath;

/// Location of a canonical or native file.
///
/// Split into a base directory (the project root being synced), a directory
/// relative to it and a bare file name, so output paths can be computed
/// without any global state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileLocation {
    pub base_dir: NormalizedPath,
    /// Directory relative to `base_dir`; empty for files at the root.
    pub relative_dir: String,
    pub file_name: String,
}

impl FileLocation {
    pub fn new(
        base_dir: impl Into<NormalizedPath>,
        relative_dir: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            relative_dir: relative_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Build a location from a path relative to `base_dir`.
    pub fn from_relative(base_dir: impl Into<NormalizedPath>, relative_path: &str) -> Self {
        let relative = NormalizedPath::new(relative_path);
        let relative_dir = relative
            .parent()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        let file_name = relative.file_name().unwrap_or_default().to_string();
        Self::new(base_dir, relative_dir, file_name)
    }

    /// Path relative to the base directory, with forward slashes.
    pub fn relative_path(&self) -> String {
        if self.relative_dir.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.relative_dir, self.file_name)
        }
    }

    /// Absolute (or base-relative) path for I/O.
    pub fn path(&self) -> NormalizedPath {
        self.base_dir.join(&self.relative_path())
    }

    /// File name with `extension` removed, if it carries it.
    pub fn stem(&self, extension: &str) -> &str {
        self.file_name
            .strip_suffix(extension)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.file_name)
    }
}

impl std::fmt::Display for FileLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
