//! Whole-file reads and atomic writes on the local disk.
//!
//! Generated tool files are replaced in one step: content goes to a sibling
//! temp file held under an `fs2` exclusive lock, is synced, then renamed over
//! the destination. A failed write removes its temp file.

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Hidden sibling used while `target` is being replaced.
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.rulesync-tmp", std::process::id()))
}

fn ensure_parent(target: &Path) -> Result<()> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn fill_locked(file: &mut File, staging: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };
    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content).map_err(|e| Error::io(staging, e))?;
    file.sync_all().map_err(|e| Error::io(staging, e))?;
    FileExt::unlock(file).map_err(|_| lock_failed())
}

/// Replace `path` with `content`, creating missing parent directories.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    ensure_parent(&target)?;

    let staging = staging_path(&target);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&staging)
        .map_err(|e| Error::io(&staging, e))?;

    let outcome = fill_locked(&mut file, &staging, &target, content)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));
    drop(file);

    match &outcome {
        Ok(()) => tracing::debug!(path = %path, bytes = content.len(), "Wrote file"),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Atomic write failed, removing temp file");
            let _ = fs::remove_file(&staging);
        }
    }
    outcome
}

pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let target = path.to_native();
    fs::read_to_string(&target).map_err(|e| Error::io(target, e))
}

pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
