use std::{
    any::Any,
    error::Error,
    fmt::{self, Display, Formatter},
};
use strum_macros::Display;

use super::message::{Info, Message};

/// Where a batch sync stands.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchProgress {
    /// The batch holds `total` files.
    #[strum(to_string = "Started with {total} files")]
    Started { total: u64 },

    /// One more file is done, synced or failed.
    #[strum(to_string = "File done")]
    FileDone,
}

impl Info for BatchProgress {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Progress of a batch sync, for surfaces that draw a total bar.
///
/// # Example
/// ```
/// use mtime2created::shared::batch_message::{BatchMessage, BatchProgress};
///
/// let started = BatchMessage::started(3);
/// assert_eq!(started.progress(), BatchProgress::Started { total: 3 });
/// ```
pub struct BatchMessage {
    progress: BatchProgress,
}

impl BatchMessage {
    /// A batch of `total` files begins.
    pub fn started(total: usize) -> Self {
        BatchMessage {
            progress: BatchProgress::Started {
                total: total as u64,
            },
        }
    }

    /// A file of the batch is done.
    pub fn file_done() -> Self {
        BatchMessage {
            progress: BatchProgress::FileDone,
        }
    }

    pub fn progress(&self) -> BatchProgress {
        self.progress
    }
}

impl Message for BatchMessage {
    fn err(&self) -> Option<&(dyn Error + Send + Sync)> {
        None
    }

    fn info(&self) -> Option<&(dyn Info + Send + Sync)> {
        Some(&self.progress)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for BatchMessage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Batch : {}", self.progress)
    }
}
