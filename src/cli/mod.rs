pub mod cli_cmds;
pub mod cli_host;
pub mod console_out;
pub mod file_logger;
pub mod progress_bars;
