use chrono::{DateTime, Local};
use std::time::SystemTime;

/// File metadata as reported by the filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FSNodeMetaData {
    /// Creation (birth) time.
    pub created: SystemTime,

    /// Modify time.
    pub modified: SystemTime,
}

impl FSNodeMetaData {
    /// Returns the creation time in local wall-clock time.
    pub fn created_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.created)
    }
}
