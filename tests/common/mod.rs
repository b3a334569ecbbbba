//! Fakes for the filesystem and the utility.
#![allow(dead_code)]

use chrono::{Local, TimeZone};
use crossbeam_channel::Receiver;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime};

use mtime2created::core::fs::fs_base::{FS, FSError, FSKind};
use mtime2created::core::fs::fs_node::FSNodeMetaData;
use mtime2created::core::touch::{Touch, TouchError};
use mtime2created::shared::message::{Message, NoticeMessage};
use mtime2created::shared::npath::{Abs, Dir, File, NPath};
use mtime2created::shared::sync_message::SyncMessage;

pub const VAULT: &str = "/vault";

/// Local wall-clock time as a `SystemTime`.
pub fn local_time(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> SystemTime {
    let local = Local
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .earliest()
        .unwrap();
    SystemTime::from(local)
}

/// An in-memory vault. Files not added are missing.
pub struct FakeFS {
    base: NPath<Abs, Dir>,
    created: HashMap<String, SystemTime>,
    pub meta_calls: AtomicUsize,
}

impl FakeFS {
    pub fn new() -> Self {
        FakeFS {
            base: NPath::<Abs, Dir>::try_from(VAULT).unwrap(),
            created: HashMap::new(),
            meta_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_file(mut self, rel_path: &str, created: SystemTime) -> Self {
        self.created.insert(format!("{}/{}", VAULT, rel_path), created);
        self
    }
}

impl FS for FakeFS {
    fn kind(&self) -> FSKind {
        FSKind::Local
    }

    fn base_path(&self) -> Result<NPath<Abs, Dir>, FSError> {
        Ok(self.base.clone())
    }

    fn meta(&self, abs_file_path: &NPath<Abs, File>) -> Result<FSNodeMetaData, FSError> {
        self.meta_calls.fetch_add(1, Ordering::SeqCst);

        match self.created.get(abs_file_path.to_raw()) {
            Some(created) => Ok(FSNodeMetaData {
                created: *created,
                modified: SystemTime::now(),
            }),
            None => Err(FSError::MetaFailed(
                abs_file_path.clone(),
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file",
                )),
            )),
        }
    }
}

/// A vault without direct filesystem access that counts stat calls.
#[derive(Default)]
pub struct UnsupportedFS {
    pub meta_calls: AtomicUsize,
}

impl FS for UnsupportedFS {
    fn kind(&self) -> FSKind {
        FSKind::Null
    }

    fn base_path(&self) -> Result<NPath<Abs, Dir>, FSError> {
        Err(FSError::NotSupported(FSKind::Null))
    }

    fn meta(&self, _abs_file_path: &NPath<Abs, File>) -> Result<FSNodeMetaData, FSError> {
        self.meta_calls.fetch_add(1, Ordering::SeqCst);
        Err(FSError::NotSupported(FSKind::Null))
    }
}

/// Records every call instead of running a utility.
#[derive(Default)]
pub struct RecordingTouch {
    pub calls: Mutex<Vec<(String, String)>>,
    slow: HashMap<String, Duration>,
    failing: Vec<String>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl RecordingTouch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays the call for `rel_path`.
    pub fn slow(mut self, rel_path: &str, delay: Duration) -> Self {
        self.slow.insert(format!("{}/{}", VAULT, rel_path), delay);
        self
    }

    /// Lets the call for `rel_path` fail.
    pub fn failing(mut self, rel_path: &str) -> Self {
        self.failing.push(format!("{}/{}", VAULT, rel_path));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn timestamp_of(&self, rel_path: &str) -> Option<String> {
        let abs_path = format!("{}/{}", VAULT, rel_path);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(path, _)| *path == abs_path)
            .map(|(_, timestamp)| timestamp.clone())
    }
}

impl Touch for RecordingTouch {
    fn set_modified(
        &self,
        abs_file_path: &NPath<Abs, File>,
        timestamp: &str,
    ) -> Result<(), TouchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.slow.get(abs_file_path.to_raw()) {
            thread::sleep(*delay);
        } else {
            thread::sleep(Duration::from_millis(5));
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.iter().any(|path| path == abs_file_path.to_raw()) {
            return Err(TouchError::Failed("utility failed".to_string()));
        }

        self.calls
            .lock()
            .unwrap()
            .push((abs_file_path.to_raw().to_string(), timestamp.to_string()));
        Ok(())
    }
}

/// Collects everything sent so far.
pub fn drain(receiver: &Receiver<Arc<dyn Message>>) -> Vec<Arc<dyn Message>> {
    receiver.try_iter().collect()
}

/// Returns the notices among `messages`.
pub fn notices(messages: &[Arc<dyn Message>]) -> Vec<(String, String)> {
    messages
        .iter()
        .filter_map(|message| message.as_ref().as_any().downcast_ref::<NoticeMessage>())
        .map(|notice| (notice.kind().to_string(), notice.text().to_string()))
        .collect()
}

/// Returns the paths of the failed files among `messages`.
pub fn failed_paths(messages: &[Arc<dyn Message>]) -> Vec<String> {
    let mut paths: Vec<String> = messages
        .iter()
        .filter_map(|message| message.as_ref().as_any().downcast_ref::<SyncMessage>())
        .filter(|sync_message| sync_message.err().is_some())
        .map(|sync_message| sync_message.rel_path.to_string())
        .collect();
    paths.sort();
    paths
}
