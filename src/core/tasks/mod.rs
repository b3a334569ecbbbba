pub mod sync_task;
pub mod task_worker;
