use thiserror::Error;

use crate::shared::npath::{Abs, File, NPath, Rel};

use super::fs::fs_base::{FS, FSError, FSKind};
use super::timestamp::format_timestamp;
use super::touch::{Touch, TouchError};

/// Defines a `SyncError`. Each variant names the stage that failed.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The vault is not stored on a directly accessible filesystem.
    #[error("The {0} adapter has no direct filesystem access")]
    UnsupportedAdapter(FSKind),

    /// The creation time could not be read.
    #[error("Failed to read the creation time of {0:?}")]
    Stat(NPath<Abs, File>, #[source] FSError),

    /// The external utility failed.
    #[error("Failed to set the modification time of {0:?}: {1}")]
    Exec(NPath<Abs, File>, #[source] TouchError),
}

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The file that was touched.
    pub abs_file_path: NPath<Abs, File>,

    /// The timestamp handed to the utility.
    pub timestamp: String,
}

/// Sets the modification time of `rel_file_path` to its creation time.
///
/// Resolves the path against the vault root, reads the birth time, formats
/// it and hands it to `touch`. The first failing stage ends the sync; in
/// particular nothing is stat'ed or spawned for an unsupported adapter,
/// and nothing is spawned when the stat fails.
pub fn sync_file(
    fs: &dyn FS,
    touch: &dyn Touch,
    rel_file_path: &NPath<Rel, File>,
) -> Result<SyncOutcome, SyncError> {
    let abs_dir_path = fs
        .base_path()
        .map_err(|_| SyncError::UnsupportedAdapter(fs.kind()))?;

    let abs_file_path = abs_dir_path.add_rel_file(rel_file_path);

    let meta = fs
        .meta(&abs_file_path)
        .map_err(|err| SyncError::Stat(abs_file_path.clone(), err))?;

    let timestamp = format_timestamp(&meta.created_local().naive_local());

    touch
        .set_modified(&abs_file_path, &timestamp)
        .map_err(|err| SyncError::Exec(abs_file_path.clone(), err))?;

    Ok(SyncOutcome {
        abs_file_path,
        timestamp,
    })
}
