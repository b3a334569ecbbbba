use crossbeam_channel::Sender;
use std::error::Error;
use std::sync::Arc;

use crate::send_info;
use crate::send_notice;
use crate::shared::config::NoticeVerbosity;
use crate::shared::i18n::{Language, MsgKey, batch_summary, t};
use crate::shared::message::{Message, NoticeKind};
use crate::shared::npath::{File, NPath, Rel};
use crate::shared::sync_message::SyncMessage;

use super::batch::{BatchSummary, run_batch};
use super::fs::fs_base::FSError;
use super::sync::{SyncError, sync_file};
use super::tasks::task_worker::TaskContext;

/// Returns the innermost error message of a chain.
fn root_cause(err: &(dyn Error + 'static)) -> String {
    let mut current = err;

    while let Some(source) = current.source() {
        current = source;
    }

    current.to_string()
}

/// Turns a sync error into the text shown after the generic error label.
fn describe(language: Language, err: &SyncError) -> String {
    match err {
        SyncError::UnsupportedAdapter(_) => t(language, MsgKey::NotFileSystem).to_string(),
        SyncError::Stat(_, FSError::NotSupported(_)) => {
            t(language, MsgKey::NotFileSystem).to_string()
        }
        SyncError::Stat(_, fs_err) => {
            format!(
                "{} {}",
                t(language, MsgKey::ErrorGettingStats),
                root_cause(fs_err)
            )
        }
        SyncError::Exec(_, touch_err) => touch_err.to_string(),
    }
}

/// The mtime2created api. Syncs files and reports the result as notices.
pub struct Mtime2Created {
    language: Language,
    notice: NoticeVerbosity,
    workers: usize,
    context: TaskContext,
    sender: Sender<Arc<dyn Message>>,
}

impl Mtime2Created {
    /// Creates an api instance with a message sender.
    pub fn new(
        language: Language,
        notice: NoticeVerbosity,
        workers: usize,
        context: TaskContext,
        sender: Sender<Arc<dyn Message>>,
    ) -> Self {
        Self {
            language,
            notice,
            workers,
            context,
            sender,
        }
    }

    /// Returns the display language chosen at start.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Syncs the active file, if there is one.
    pub fn sync_active(&self, active_file: Option<&NPath<Rel, File>>) {
        match active_file {
            Some(rel_file_path) => {
                self.sync_one(rel_file_path);
            }
            None => {
                send_notice!(
                    self.sender,
                    NoticeKind::Failure,
                    "{}",
                    t(self.language, MsgKey::NoFileSelected)
                );
            }
        }
    }

    /// Syncs a single file and tells the user how it went.
    pub fn sync_one(&self, rel_file_path: &NPath<Rel, File>) -> bool {
        match sync_file(
            self.context.fs.as_ref(),
            self.context.touch.as_ref(),
            rel_file_path,
        ) {
            Ok(outcome) => {
                send_info!(self.sender, "{} synced to {}", rel_file_path, outcome.timestamp);

                match self.notice {
                    NoticeVerbosity::Generic => send_notice!(
                        self.sender,
                        NoticeKind::Success,
                        "{}",
                        t(self.language, MsgKey::SyncSuccess)
                    ),
                    NoticeVerbosity::Timestamp => send_notice!(
                        self.sender,
                        NoticeKind::Success,
                        "{}: {}",
                        t(self.language, MsgKey::SyncSuccess),
                        outcome.timestamp
                    ),
                }

                true
            }
            Err(err) => {
                let text = describe(self.language, &err);

                let _ = self.sender.send(Arc::new(SyncMessage::new(
                    0,
                    rel_file_path,
                    Some(Arc::new(err)),
                    None,
                )));

                send_notice!(
                    self.sender,
                    NoticeKind::Failure,
                    "{}: {}",
                    t(self.language, MsgKey::ErrorSyncing),
                    text
                );

                false
            }
        }
    }

    /// Syncs every file of the selection and shows one summary notice.
    pub fn sync_batch(&self, rel_files: &[NPath<Rel, File>]) -> BatchSummary {
        send_info!(self.sender, "Start batch sync of {} files", rel_files.len());

        let summary = run_batch(
            self.workers,
            self.context.clone(),
            rel_files.to_vec(),
            self.sender.clone(),
        );

        send_info!(
            self.sender,
            "Batch sync finished: {} synced, {} failed",
            summary.synced,
            summary.failed
        );

        let kind = if summary.failed == 0 {
            NoticeKind::Success
        } else {
            NoticeKind::Failure
        };

        send_notice!(
            self.sender,
            kind,
            "{}",
            batch_summary(self.language, summary.synced, summary.failed)
        );

        summary
    }
}
