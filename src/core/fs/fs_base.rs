use std::error::Error;
use std::sync::Arc;
use strum_macros::Display;
use thiserror::Error;

use crate::shared::npath::{Abs, Dir, File, NPath};

use super::fs_node::FSNodeMetaData;

pub type FSHandle = Arc<dyn FS>;

/// The kind of storage behind a `FS`.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FSKind {
    /// Files live directly on the local filesystem.
    #[strum(to_string = "local")]
    Local,

    /// No direct filesystem access (remote, virtual or absent storage).
    #[strum(to_string = "null")]
    Null,
}

/// Defines a custom error type for the file system (FS).
#[derive(Error, Debug)]
pub enum FSError {
    /// Error when the operation is not supported by the adapter.
    #[error("Operation not supported by the {0} adapter.")]
    NotSupported(FSKind),

    /// Error when the metadata of the file cannot be retrieved, including the path.
    #[error("Failed to retrieve meta data {0:?}")]
    MetaFailed(NPath<Abs, File>, #[source] Box<dyn Error + Send + Sync>),
}

/// Defines the interface (trait) that a fs must implement.
pub trait FS: Send + Sync {
    /// Returns the storage kind.
    fn kind(&self) -> FSKind;

    /// Returns the absolute root directory of the vault.
    ///
    /// # Errors
    ///
    /// Returns [`FSError::NotSupported`] when the adapter has no direct filesystem path.
    fn base_path(&self) -> Result<NPath<Abs, Dir>, FSError>;

    /// Returns metadata of the file at the specified `abs_file_path`.
    ///
    /// # Errors
    ///
    /// - Returns [`FSError::NotSupported`] when the adapter cannot stat files.
    /// - Returns [`FSError::MetaFailed`] when the file is missing, is not a regular file,
    ///   or the platform cannot report its creation time.
    fn meta(&self, abs_file_path: &NPath<Abs, File>) -> Result<FSNodeMetaData, FSError>;
}
