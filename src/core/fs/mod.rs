pub mod fs_base;
pub mod fs_node;
pub mod local_fs;
pub mod null_fs;
