use crossbeam_channel::Sender;
use std::error::Error;
use std::sync::Arc;
use std::thread;
use trait_set::trait_set;

use crate::send_error;
use crate::shared::message::Info;
use crate::shared::message::Message;
use crate::shared::message::StringError;
use crate::shared::npath::{File, NPath, Rel};
use crate::shared::sync_message::SyncMessage;

use super::super::fs::fs_base::FSHandle;
use super::super::touch::Touch;

trait_set! {
    pub trait TaskErrorFn = Fn(&NPath<Rel, File>, Arc<dyn Error + Send + Sync>) -> Arc<SyncMessage>;
    pub trait TaskInfoFn = Fn(&NPath<Rel, File>, Arc<dyn Info + Send + Sync>) -> Arc<SyncMessage>;
    pub trait Task =
    Fn(
        &dyn TaskErrorFn,
        &dyn TaskInfoFn,
        &TaskContext,
        Sender<Arc<dyn Message>>
    ) -> bool
    + Send
    + Sync
    + 'static
}

/// What a task needs to reach the files: the vault adapter and the utility.
#[derive(Clone)]
pub struct TaskContext {
    pub fs: FSHandle,
    pub touch: Arc<dyn Touch>,
}

/// Defines the `TaskWorker`.
///
/// Runs a task on a fixed number of threads. Each thread calls the task
/// again until it returns `false`, so at most `threads` tasks are in
/// flight at any time.
pub struct TaskWorker {
    context: TaskContext,
    sender: Sender<Arc<dyn Message>>,
}

/// Methods of `TaskWorker`.
impl TaskWorker {
    /// Creates a new instance of `TaskWorker`.
    pub fn new(context: TaskContext, sender: Sender<Arc<dyn Message>>) -> Self {
        Self { context, sender }
    }

    /// Runs `task` on `threads` threads and returns when all of them are done.
    pub fn run(&self, threads: usize, task: Arc<dyn Task>) {
        let mut handles: Vec<thread::JoinHandle<()>> = vec![];

        for worker_number in 0..threads.max(1) {
            let context = self.context.clone();
            let sender: Sender<Arc<dyn Message>> = self.sender.clone();
            let task: Arc<dyn Task> = Arc::clone(&task);

            let handle: thread::JoinHandle<()> = thread::spawn(move || {
                let mut processing: bool = true;

                let create_task_error_message =
                    move |rel_path: &NPath<Rel, File>, error: Arc<dyn Error + Send + Sync>| {
                        Arc::new(SyncMessage::new(worker_number, rel_path, Some(error), None))
                    };

                let create_task_info_message =
                    move |rel_path: &NPath<Rel, File>, info: Arc<dyn Info + Send + Sync>| {
                        Arc::new(SyncMessage::new(worker_number, rel_path, None, Some(info)))
                    };

                while processing {
                    processing = task(
                        &create_task_error_message,
                        &create_task_info_message,
                        &context,
                        sender.clone(),
                    );
                }
            });

            handles.push(handle);
        }

        for (worker_number, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                send_error!(
                    self.sender,
                    StringError::new(format!("Worker {} panicked", worker_number))
                );
            }
        }
    }
}
