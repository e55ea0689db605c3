//! The injected filesystem interface
//!
//! The conversion engine never touches `std::fs` directly. Every read and
//! write goes through a [`FileSystem`] handed in by the caller, so the same
//! processors run against the real disk ([`LocalFs`]) or an in-memory tree
//! ([`MemoryFs`]) for tests and dry runs.

use crate::{Error, NormalizedPath, Result, io};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// Filesystem operations required by the conversion engine.
///
/// Implementations provide no retry, atomicity, or locking guarantees
/// beyond what they document themselves.
pub trait FileSystem {
    /// Whether `path` exists and is a directory.
    fn dir_exists(&self, path: &NormalizedPath) -> bool;

    /// Whether `path` exists and is a regular file.
    fn file_exists(&self, path: &NormalizedPath) -> bool;

    /// Read a UTF-8 text file.
    fn read_file(&self, path: &NormalizedPath) -> Result<String>;

    /// Write a text file, creating missing parent directories.
    fn write_file(&self, path: &NormalizedPath, content: &str) -> Result<()>;

    /// Create a directory and all missing ancestors.
    fn make_dir(&self, path: &NormalizedPath) -> Result<()>;

    /// List the names of regular files directly inside `dir`, sorted.
    ///
    /// A missing directory yields an empty list.
    fn list_files(&self, dir: &NormalizedPath) -> Result<Vec<String>>;
}

/// [`FileSystem`] backed by the local disk.
///
/// Writes are atomic (temp file + rename under an advisory lock).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn dir_exists(&self, path: &NormalizedPath) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &NormalizedPath) -> Result<String> {
        io::read_text(path)
    }

    fn write_file(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        io::write_text(path, content)
    }

    fn make_dir(&self, path: &NormalizedPath) -> Result<()> {
        tracing::debug!(path = %path, "Creating directory");
        let native = path.to_native();
        fs::create_dir_all(&native).map_err(|e| Error::io(native, e))
    }

    fn list_files(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        let native = dir.to_native();
        if !native.is_dir() {
            tracing::debug!(dir = %dir, "No directory to list");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            let path = entry.path();
            if path.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory [`FileSystem`].
///
/// Files are keyed by their normalized path string. Directories are tracked
/// explicitly (from `make_dir`) and implicitly (as ancestors of files).
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<String, String>>,
    dirs: RefCell<BTreeSet<String>>,
    read_only: RefCell<BTreeSet<String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (builder style).
    pub fn with_file(self, path: impl Into<NormalizedPath>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Seed or replace a file.
    pub fn insert(&self, path: impl Into<NormalizedPath>, content: impl Into<String>) {
        let path = path.into();
        self.register_ancestors(&path);
        self.files
            .borrow_mut()
            .insert(path.as_str().to_string(), content.into());
    }

    /// Make every subsequent write to `path` fail with a permission error.
    pub fn deny_writes(&self, path: impl Into<NormalizedPath>) {
        self.read_only
            .borrow_mut()
            .insert(path.into().as_str().to_string());
    }

    /// Content of a file, if present.
    pub fn get(&self, path: impl Into<NormalizedPath>) -> Option<String> {
        self.files.borrow().get(path.into().as_str()).cloned()
    }

    /// All file paths currently stored, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    fn register_ancestors(&self, path: &NormalizedPath) {
        let mut dirs = self.dirs.borrow_mut();
        let mut current = path.parent();
        while let Some(dir) = current {
            if !dirs.insert(dir.as_str().to_string()) {
                break;
            }
            current = dir.parent();
        }
    }
}

impl FileSystem for MemoryFs {
    fn dir_exists(&self, path: &NormalizedPath) -> bool {
        path.as_str() == "." || self.dirs.borrow().contains(path.as_str())
    }

    fn file_exists(&self, path: &NormalizedPath) -> bool {
        self.files.borrow().contains_key(path.as_str())
    }

    fn read_file(&self, path: &NormalizedPath) -> Result<String> {
        self.files
            .borrow()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| Error::not_found(path.to_native()))
    }

    fn write_file(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        if self.read_only.borrow().contains(path.as_str()) {
            return Err(Error::io(
                path.to_native(),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        self.insert(path.clone(), content);
        Ok(())
    }

    fn make_dir(&self, path: &NormalizedPath) -> Result<()> {
        self.dirs.borrow_mut().insert(path.as_str().to_string());
        self.register_ancestors(path);
        Ok(())
    }

    fn list_files(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        let files = self.files.borrow();
        let names = files
            .keys()
            .filter_map(|key| {
                let parent = NormalizedPath::new(key).parent();
                let in_dir = match parent {
                    Some(parent) => parent == *dir,
                    None => dir.as_str() == ".",
                };
                if in_dir {
                    NormalizedPath::new(key).file_name().map(str::to_string)
                } else {
                    None
                }
            })
            .collect();
        Ok(names)
    }
}
