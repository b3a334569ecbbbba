use crossbeam_channel::Sender;
use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use crate::shared::message::Message;
use crate::shared::npath::{File, NPath, Rel};
use crate::shared::batch_message::BatchMessage;

use super::tasks::sync_task::{SyncCounters, sync_task};
use super::tasks::task_worker::{TaskContext, TaskWorker};

/// Outcome of a batch sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub synced: usize,
    pub failed: usize,
}

/// Syncs every file of `rel_files` independently.
///
/// At most `workers` files are in flight at once. A failing file is counted
/// and reported on the message bus as a `SyncMessage` error but never stops
/// the others. Returns once every file has been handled.
pub fn run_batch(
    workers: usize,
    context: TaskContext,
    rel_files: Vec<NPath<Rel, File>>,
    sender: Sender<Arc<dyn Message>>,
) -> BatchSummary {
    let items = rel_files.len();

    if items == 0 {
        return BatchSummary::default();
    }

    let _ = sender.send(Arc::new(BatchMessage::started(items)));

    let queue: VecDeque<NPath<Rel, File>> = rel_files.into_iter().collect();
    let arc_mutex_rel_files = Arc::new(Mutex::new(queue));
    let counters = Arc::new(SyncCounters::default());

    let task_worker = TaskWorker::new(context, sender);
    task_worker.run(
        workers.clamp(1, items),
        Arc::new(sync_task(arc_mutex_rel_files, counters.clone())),
    );

    BatchSummary {
        synced: counters.synced.load(Ordering::SeqCst),
        failed: counters.failed.load(Ordering::SeqCst),
    }
}
