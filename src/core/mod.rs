pub mod api;
pub mod batch;
pub mod fs;
pub mod plugin;
pub mod sync;
pub mod tasks;
pub mod timestamp;
pub mod touch;
