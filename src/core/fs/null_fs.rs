use crate::shared::npath::{Abs, Dir, File, NPath};

use super::fs_base::{FS, FSError, FSKind};
use super::fs_node::FSNodeMetaData;

/// A fs without direct filesystem access.
///
/// Stands in for any storage that files cannot be stat'ed or touched on
/// by path, e.g. a remote or in-memory vault. Every operation is refused.
pub struct NullFS;

impl NullFS {
    /// Creates a new instance of `NullFS`.
    pub fn new() -> Self {
        NullFS
    }
}

impl Default for NullFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FS for NullFS {
    fn kind(&self) -> FSKind {
        FSKind::Null
    }

    fn base_path(&self) -> Result<NPath<Abs, Dir>, FSError> {
        Err(FSError::NotSupported(FSKind::Null))
    }

    fn meta(&self, _abs_file_path: &NPath<Abs, File>) -> Result<FSNodeMetaData, FSError> {
        Err(FSError::NotSupported(FSKind::Null))
    }
}
