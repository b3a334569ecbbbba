use crossbeam_channel::Sender;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::shared::message::Message;
use crate::shared::npath::{File, NPath, Rel};
use crate::shared::batch_message::BatchMessage;
use crate::shared::sync_message::SyncInfo;

use super::super::sync::sync_file;
use super::task_worker::{Task, TaskContext, TaskErrorFn, TaskInfoFn};

/// Success and failure counters shared by the workers of one batch.
#[derive(Debug, Default)]
pub struct SyncCounters {
    pub synced: AtomicUsize,
    pub failed: AtomicUsize,
}

/// Task that syncs queued files one at a time.
///
/// A failing file is counted and reported, then the task moves on.
pub fn sync_task(
    rel_files: Arc<Mutex<VecDeque<NPath<Rel, File>>>>,
    counters: Arc<SyncCounters>,
) -> impl Task {
    move |create_task_error_msg: &dyn TaskErrorFn,
          create_task_info_msg: &dyn TaskInfoFn,
          context: &TaskContext,
          sender: Sender<Arc<dyn Message>>| {
        // Pop the first element.
        let rel_files_element = rel_files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        let Some(rel_file_path) = rel_files_element else {
            return false;
        };

        let _ = sender.send(create_task_info_msg(&rel_file_path, Arc::new(SyncInfo::Start)));

        match sync_file(context.fs.as_ref(), context.touch.as_ref(), &rel_file_path) {
            Ok(outcome) => {
                counters.synced.fetch_add(1, Ordering::SeqCst);
                let _ = sender.send(create_task_info_msg(
                    &rel_file_path,
                    Arc::new(SyncInfo::Synced {
                        timestamp: outcome.timestamp,
                    }),
                ));
            }
            Err(err) => {
                counters.failed.fetch_add(1, Ordering::SeqCst);
                let _ = sender.send(create_task_error_msg(&rel_file_path, Arc::new(err)));
            }
        }

        let _ = sender.send(Arc::new(BatchMessage::file_done()));

        true
    }
}
