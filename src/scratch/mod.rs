//! Scratch File Persistence and Deferred Cleanup
//!
//! Bridges decoders that want a file path rather than an in-memory buffer.
//! Each scratch file carries a collision-resistant random name, so
//! concurrent loads never contend on the filesystem namespace. Deletion is
//! owned by a detached timer task, not by a Drop guard: the file must
//! outlive the load call long enough for the decode service to read it.

use crate::clip::AudioFormat;
use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Name prefix for scratch files
pub const SCRATCH_PREFIX: &str = "clip-";

/// Delay between play start and scratch file deletion
pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(5);

/// Write `bytes` to a uniquely named scratch file.
///
/// The file lands in `dir` (the system temp directory when `None`) with the
/// extension of `format`, and is persisted past the temp-file guard so that
/// [`schedule_cleanup`] alone decides when it disappears.
pub fn write_scratch(bytes: &[u8], format: AudioFormat, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::temp_dir(),
    };

    let mut file = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(&dir)?;

    file.write_all(bytes)?;
    file.flush()?;

    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

/// Schedule best-effort deletion of `path` after `delay`.
///
/// The task runs detached from the caller. A file that is already gone is
/// tolerated; any other deletion failure is logged as a warning and
/// swallowed. The returned handle is for observers that want to await the
/// deletion; the task completes whether or not it is awaited.
pub fn schedule_cleanup(path: PathBuf, delay: Duration, label: &str) -> JoinHandle<()> {
    let label = label.to_string();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("[{}] deleted scratch file '{}'", label, path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[{}] scratch file '{}' already gone", label, path.display());
            }
            Err(e) => {
                tracing::warn!(
                    "[{}] failed to delete scratch file '{}': {}",
                    label,
                    path.display(),
                    e
                );
            }
        }
    })
}
