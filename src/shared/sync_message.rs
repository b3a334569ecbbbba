use std::{
    any::Any,
    error::Error,
    fmt::{self, Display, Formatter},
    sync::Arc,
};
use strum_macros::Display;

use super::message::{Info, Message};
use super::npath::{File, NPath, Rel};

/// Progress of a single file inside a sync run.
#[derive(Display, Debug, PartialEq)]
pub enum SyncInfo {
    /// The worker picked up the file.
    #[strum(to_string = "Start sync ...")]
    Start,

    /// The modification time now equals the creation time.
    #[strum(to_string = "Synced to {timestamp}")]
    Synced { timestamp: String },
}

impl Info for SyncInfo {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Defines a `SyncMessage`.
///
/// Per file diagnostics of a sync run: which worker handled which file and
/// how it went. Surfaces decide what to show; the file logger records the
/// errors.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use mtime2created::shared::message::StringError;
/// use mtime2created::shared::sync_message::{SyncInfo, SyncMessage};
/// use mtime2created::shared::npath::{NPath, Rel, File};
///
/// let rel_file_path = NPath::<Rel, File>::try_from("notes/a.md").unwrap();
/// let failed = SyncMessage::new(1, &rel_file_path, Some(Arc::new(StringError::new("boom".into()))), None);
/// let started = SyncMessage::new(1, &rel_file_path, None, Some(Arc::new(SyncInfo::Start)));
/// ```
pub struct SyncMessage {
    /// The worker number.
    pub worker_number: usize,

    /// The file, relative to the vault root.
    pub rel_path: NPath<Rel, File>,

    /// Error (if any).
    error: Option<Arc<dyn Error + Send + Sync>>,

    /// Info (if any).
    info: Option<Arc<dyn Info + Send + Sync>>,
}

impl SyncMessage {
    /// Creates a new instance of `SyncMessage`.
    pub fn new(
        worker_number: usize,
        rel_path: &NPath<Rel, File>,
        error: Option<Arc<dyn Error + Send + Sync>>,
        info: Option<Arc<dyn Info + Send + Sync>>,
    ) -> Self {
        SyncMessage {
            worker_number,
            rel_path: rel_path.clone(),
            error,
            info,
        }
    }
}

/// Implementation of Message for SyncMessage.
impl Message for SyncMessage {
    fn err(&self) -> Option<&(dyn Error + Send + Sync)> {
        self.error.as_deref()
    }

    fn info(&self) -> Option<&(dyn Info + Send + Sync)> {
        self.info.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Implementation of Display for SyncMessage.
impl Display for SyncMessage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if let Some(err) = self.err() {
            write!(
                formatter,
                "Worker: {} : Error : {} : {}",
                self.worker_number, self.rel_path, err
            )
        } else if let Some(info) = self.info() {
            write!(
                formatter,
                "Worker: {} : Info : {} : {}",
                self.worker_number, self.rel_path, info
            )
        } else {
            write!(
                formatter,
                "Worker: {} : No Message : {}",
                self.worker_number, self.rel_path
            )
        }
    }
}
