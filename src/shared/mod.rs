pub mod batch_message;
pub mod config;
pub mod i18n;
pub mod message;
pub mod msg_dispatcher;
pub mod npath;
pub mod sync_message;
