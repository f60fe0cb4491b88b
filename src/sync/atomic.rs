//! sync::atomic
//!
//! Atomic replacement of a file's contents.
//!
//! # Protocol
//!
//! 1. Create a temp file in the target's directory (same filesystem, so the
//!    final rename is atomic)
//! 2. Write and fsync the new contents
//! 3. Copy the target's permissions onto the temp file
//! 4. Rename the temp file over the target
//!
//! A symlinked target is resolved first: the link stays in place and the
//! file it points to is the one replaced.
//!
//! The temp file is a `tempfile::NamedTempFile` guard. Any early return,
//! including a failed rename, drops the guard and removes the file, so a
//! failure never leaves a partial artifact and never touches the target.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use super::SyncError;

/// Prefix of temp files created next to the target.
pub const TEMP_PREFIX: &str = ".strsync-";

/// Replace the contents of `path` with `contents`.
///
/// # Errors
///
/// Returns `SyncError::Io` naming the path involved, including when the
/// target's metadata cannot be read or a symlink cannot be resolved. On
/// error, `path` is unchanged and no temp file remains.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<(), SyncError> {
    let target = resolve_target(path)?;
    let path = target.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| SyncError::io(&dir, e))?;

    write_contents(&mut temp, contents).map_err(|e| SyncError::io(temp.path(), e))?;

    match fs::metadata(path) {
        Ok(metadata) => temp
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| SyncError::io(temp.path(), e))?,
        // Nothing to inherit from yet.
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(SyncError::io(path, e)),
    }

    temp.persist(path)
        .map_err(|e| SyncError::io(path, e.error))?;

    Ok(())
}

/// The file a write to `path` should land in: `path` itself, or the final
/// target when `path` is a symlink.
fn resolve_target(path: &Path) -> Result<PathBuf, SyncError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| SyncError::io(path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_contents(temp: &mut NamedTempFile, contents: &[u8]) -> io::Result<()> {
    temp.write_all(contents)?;
    temp.flush()?;

    #[cfg(any(test, feature = "fault_injection"))]
    if fault_injection::should_fail() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "simulated failure before rename",
        ));
    }

    temp.as_file().sync_all()
}

/// Fault injection for testing the cleanup guarantees.
///
/// # Usage
///
/// ```ignore
/// use strsync::sync::atomic::fault_injection;
///
/// // The next replacement fails after writing its temp file
/// fault_injection::fail_next_write();
/// assert!(replace_file(&path, b"new").is_err());
///
/// fault_injection::reset();
/// ```
#[cfg(any(test, feature = "fault_injection"))]
pub mod fault_injection {
    use std::cell::Cell;

    // Thread-local so parallel tests do not interfere.
    thread_local! {
        static FAIL_NEXT: Cell<bool> = const { Cell::new(false) };
    }

    /// Make the next write on this thread fail once its temp file holds
    /// the new contents.
    pub fn fail_next_write() {
        FAIL_NEXT.with(|c| c.set(true));
    }

    /// Consume a pending failure.
    pub fn should_fail() -> bool {
        FAIL_NEXT.with(|c| c.replace(false))
    }

    /// Clear any pending failure.
    pub fn reset() {
        FAIL_NEXT.with(|c| c.set(false));
    }
}
