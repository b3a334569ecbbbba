use crossbeam_channel::{Receiver, Sender, select, unbounded};
use flexi_logger::writers::LogWriter;
use flexi_logger::{DeferredNow, FlexiLoggerError, LoggerHandle};
use flexi_logger::{Logger, WriteMode};
use log::{LevelFilter, Record};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;

use mtime2created::shared::message::{ErrorMessage, InfoMessage, Message};
use mtime2created::shared::message::NoticeMessage;
use mtime2created::shared::sync_message::{SyncInfo, SyncMessage};

/// Errors while setting up the file logger.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to open log file {0:?}")]
    OpenFailed(PathBuf, #[source] io::Error),

    #[error("Failed to start logger")]
    StartFailed(#[from] FlexiLoggerError),
}

/// Trace error.
fn trace_error(err: &dyn std::error::Error) -> String {
    let mut msg = format!("{}", err);
    let mut source = err.source();

    while let Some(err) = source {
        msg.push_str(&format!("\nCaused by: {}", err));
        source = err.source();
    }

    msg
}

fn poisoned() -> io::Error {
    io::Error::other("log file lock poisoned")
}

/// Defines a `LogFile`
struct LogFile {
    file: Mutex<std::fs::File>,
    log_levels: Vec<log::Level>,
}

/// Methods of `LogFile`.
impl LogFile {
    /// Creates a new `LogFile`, truncating an existing one.
    pub fn new(file_path: &Path, log_levels: Vec<log::Level>) -> Result<Self, LogError> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .map_err(|err| LogError::OpenFailed(file_path.to_path_buf(), err))?;

        Ok(LogFile {
            file: Mutex::new(file),
            log_levels,
        })
    }

    /// Check if the log file accepts the log level.
    pub fn accepts_level(&self, level: log::Level) -> bool {
        self.log_levels.contains(&level)
    }

    /// Write a message to the log file.
    pub fn write(&self, msg: &str) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| poisoned())?
            .write_all(msg.as_bytes())
    }

    /// Flush the log file.
    pub fn flush(&self) -> io::Result<()> {
        self.file.lock().map_err(|_| poisoned())?.flush()
    }
}

/// Defines a `LevelFileLogWriter`.
struct LevelFileLogWriter {
    log_files: Vec<LogFile>,
}

impl LevelFileLogWriter {
    pub fn new() -> Self {
        LevelFileLogWriter {
            log_files: Vec::new(),
        }
    }
}

impl LogWriter for LevelFileLogWriter {
    /// Write the log record.
    fn write(&self, now: &mut DeferredNow, record: &Record) -> io::Result<()> {
        let log_msg = format!(
            "{} {} {}\n",
            now.now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        );

        for log_file in self
            .log_files
            .iter()
            .filter(|log_file| log_file.accepts_level(record.level()))
        {
            log_file.write(log_msg.as_str())?;
        }

        Ok(())
    }

    /// Flush the log files.
    fn flush(&self) -> io::Result<()> {
        for log_file in self.log_files.iter() {
            let _ = log_file.flush();
        }

        Ok(())
    }
}

/// Defines a `LogBuilder`.
///
/// Prepares a logger that logs messages to files based on their levels.
pub struct LogBuilder {
    receiver: Arc<Receiver<Arc<dyn Message>>>,
    log_dir: PathBuf,
    log_writer: LevelFileLogWriter,
}

/// Methods of `LogBuilder`.
impl LogBuilder {
    /// Creates a new `LogBuilder`. Log files are created in `log_dir`.
    pub fn new(receiver: Arc<Receiver<Arc<dyn Message>>>, log_dir: &Path) -> Self {
        LogBuilder {
            receiver,
            log_dir: log_dir.to_path_buf(),
            log_writer: LevelFileLogWriter::new(),
        }
    }

    /// Adds a log file with accepted levels.
    pub fn add_log_file(mut self, accept: Vec<log::Level>, file_name: &str) -> Result<Self, LogError> {
        let log_file = LogFile::new(&self.log_dir.join(file_name), accept)?;
        self.log_writer.log_files.push(log_file);
        Ok(self)
    }

    /// Creates a logger instance.
    pub fn build(self) -> Result<Log, LogError> {
        let logger_handle = Logger::with(LevelFilter::Debug)
            .log_to_writer(Box::new(self.log_writer))
            .write_mode(WriteMode::Direct)
            .start()?;

        Ok(Log {
            receiver: self.receiver,
            shutdown_sender: None,
            thread_handle: None,
            logger_handle: Some(logger_handle),
        })
    }
}

/// Writes a message to the log, if it carries something worth logging.
fn log_message(message: &Arc<dyn Message>) {
    if let Some(sync_message) = message.as_ref().as_any().downcast_ref::<SyncMessage>() {
        if let Some(err) = sync_message.err() {
            log::error!("{} : {}", sync_message.rel_path, trace_error(err));
        } else if let Some(info) = sync_message.info()
            && let Some(SyncInfo::Synced { .. }) = info.as_any().downcast_ref::<SyncInfo>()
        {
            log::info!("{} : {}", sync_message.rel_path, info);
        }
    } else if let Some(notice) = message.as_ref().as_any().downcast_ref::<NoticeMessage>() {
        log::info!("{}", notice);
    } else if let Some(info_message) = message.as_ref().as_any().downcast_ref::<InfoMessage>()
        && let Some(info) = info_message.info()
    {
        log::info!("{}", info);
    } else if let Some(error_message) = message.as_ref().as_any().downcast_ref::<ErrorMessage>()
        && let Some(err) = error_message.err()
    {
        log::error!("{}", trace_error(err));
    }
}

/// Defines a `Log`.
///
/// A logger that logs messages to files based on their levels.
pub struct Log {
    receiver: Arc<Receiver<Arc<dyn Message>>>,
    shutdown_sender: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
    logger_handle: Option<LoggerHandle>,
}

impl Log {
    /// Starts the logger.
    pub fn start(&mut self) {
        let receiver = Arc::clone(&self.receiver);
        let (shutdown_sender, shutdown_receiver) = unbounded();
        self.shutdown_sender = Some(shutdown_sender);

        // Handle messages in a separate thread
        self.thread_handle = Some(thread::spawn(move || {
            loop {
                select! {
                    recv(receiver) -> message => {
                        match message {
                            Ok(message) => log_message(&message),
                            Err(_) => break,
                        }
                    },
                    recv(shutdown_receiver) -> _ => {
                        for message in receiver.try_iter() {
                            log_message(&message);
                        }
                        break;
                    },
                }
            }
        }));
    }

    /// Stops the logger.
    pub fn stop(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            thread::sleep(Duration::from_millis(100)); // Lets wait a little bit to receiver pending msgs.
            let _ = sender.send(()); // signal shutdown
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }

        if let Some(logger_handle) = self.logger_handle.take() {
            logger_handle.flush();
        }
    }
}
