use console::Style;
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mtime2created::shared::batch_message::{BatchMessage, BatchProgress};
use mtime2created::shared::message::{Message, NoticeKind, NoticeMessage};
use mtime2created::shared::sync_message::{SyncInfo, SyncMessage};

/// Styles of the progress bars.
struct Styles {
    green: Style,
    red: Style,
}

/// Updates the bars for one message.
fn show_message(
    message: &Arc<dyn Message>,
    multi_progress: &MultiProgress,
    worker_bars: &[ProgressBar],
    total_bar: &ProgressBar,
    styles: &Styles,
) {
    if let Some(sync_message) = message.as_ref().as_any().downcast_ref::<SyncMessage>() {
        let Some(bar) = worker_bars.get(sync_message.worker_number) else {
            return;
        };

        if sync_message.err().is_some() {
            // Which file failed is for the log only.
            bar.set_message("");
        } else if let Some(info) = sync_message.info()
            && let Some(sync_info) = info.as_any().downcast_ref::<SyncInfo>()
        {
            match sync_info {
                SyncInfo::Start => bar.set_message(format!("{}", sync_message.rel_path)),
                SyncInfo::Synced { .. } => bar.set_message(format!(
                    "{} : {}",
                    sync_message.rel_path,
                    styles.green.apply_to(info)
                )),
            }
            bar.tick();
        }
    } else if let Some(batch_message) = message.as_ref().as_any().downcast_ref::<BatchMessage>() {
        match batch_message.progress() {
            BatchProgress::Started { total } => total_bar.set_length(total),
            BatchProgress::FileDone => total_bar.inc(1),
        }
    } else if let Some(notice) = message.as_ref().as_any().downcast_ref::<NoticeMessage>() {
        let text = match notice.kind() {
            NoticeKind::Success => styles.green.apply_to(notice.text()),
            NoticeKind::Failure => styles.red.apply_to(notice.text()),
        };
        // `println` of a hidden draw target drops the line.
        multi_progress.suspend(|| println!("{}", text));
    }
}

/// Visualizes a batch sync as progress bars.
///
/// One spinner per worker shows the file in work, a total bar counts the
/// finished files. Notices are printed above the bars.
pub struct ProgressBars {
    receiver: Arc<Receiver<Arc<dyn Message>>>,
    shutdown_sender: Option<Sender<()>>,
    multi_progress: MultiProgress,
    worker_bars: Arc<Vec<ProgressBar>>,
    total_bar: ProgressBar,
    thread_handle: Option<JoinHandle<()>>,
}

/// Methods of `ProgressBars`.
impl ProgressBars {
    /// Creates a new `ProgressBars` with one bar per worker. Takes a message receiver.
    pub fn new(receiver: Arc<Receiver<Arc<dyn Message>>>, workers: usize) -> Self {
        let multi_progress = MultiProgress::new();

        let worker_style = ProgressStyle::with_template("{prefix:.bold.dim} {spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let total_style =
            ProgressStyle::with_template("{prefix:.bold.dim} [{wide_bar:.green}] {pos}/{len}")
                .map(|style| style.progress_chars(". "))
                .unwrap_or_else(|_| ProgressStyle::default_bar());

        let worker_bars = (0..workers.max(1))
            .map(|worker_number| {
                let bar = multi_progress.add(ProgressBar::new(0));
                bar.set_style(worker_style.clone());
                bar.set_prefix(format!("[{}]", worker_number));
                bar
            })
            .collect();

        let total_bar = multi_progress.add(ProgressBar::new(0));
        total_bar.set_style(total_style);
        total_bar.set_prefix("[Progress]".to_string());

        Self {
            receiver,
            shutdown_sender: None,
            multi_progress,
            worker_bars: Arc::new(worker_bars),
            total_bar,
            thread_handle: None,
        }
    }

    /// Starts a thread that listens for messages and visualizes them as progress bars.
    pub fn start(&mut self) {
        let receiver = Arc::clone(&self.receiver);
        let (shutdown_sender, shutdown_receiver) = unbounded();
        self.shutdown_sender = Some(shutdown_sender);

        let multi_progress = self.multi_progress.clone();
        let worker_bars = Arc::clone(&self.worker_bars);
        let total_bar = self.total_bar.clone();

        self.thread_handle = Some(thread::spawn(move || {
            let styles = Styles {
                green: Style::new().green().bold(),
                red: Style::new().red().bold(),
            };

            loop {
                select! {
                    recv(receiver) -> msg => {
                        match msg {
                            Ok(message) => show_message(&message, &multi_progress, &worker_bars, &total_bar, &styles),
                            Err(_) => break, // channel closed
                        }
                    },
                    recv(shutdown_receiver) -> _ => {
                        for message in receiver.try_iter() {
                            show_message(&message, &multi_progress, &worker_bars, &total_bar, &styles);
                        }
                        break;
                    }
                }
            }
        }));
    }

    /// Signal the thread to stop and wait for it to finish.
    pub fn stop(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            thread::sleep(Duration::from_millis(100)); // Lets wait a little bit to receive pending messages.
            let _ = sender.send(()); // signal shutdown
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }

        for bar in self.worker_bars.iter() {
            bar.finish_and_clear();
        }
        self.total_bar.finish();
    }
}
