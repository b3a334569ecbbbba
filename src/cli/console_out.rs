use console::Style;
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mtime2created::shared::message::{ErrorMessage, Message, NoticeKind, NoticeMessage};

/// Prints a message, if it is meant for the user.
fn print_message(message: &Arc<dyn Message>, green: &Style, red: &Style) {
    if let Some(notice) = message.as_ref().as_any().downcast_ref::<NoticeMessage>() {
        match notice.kind() {
            NoticeKind::Success => println!("{}", green.apply_to(notice.text())),
            NoticeKind::Failure => println!("{}", red.apply_to(notice.text())),
        }
    } else if let Some(error_message) = message.as_ref().as_any().downcast_ref::<ErrorMessage>()
        && let Some(err) = error_message.err()
    {
        println!("{}", red.apply_to(err));
    }
}

/// Prints notices and errors to the console.
///
/// Per file sync messages are diagnostics and only go to the log.
pub struct ConsoleOut {
    receiver: Arc<Receiver<Arc<dyn Message>>>,
    shutdown_sender: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl ConsoleOut {
    /// Creates a new console. Takes a message receiver.
    pub fn new(receiver: Arc<Receiver<Arc<dyn Message>>>) -> Self {
        Self {
            receiver,
            shutdown_sender: None,
            thread_handle: None,
        }
    }

    /// Starts a thread that listens for messages and prints them to the console.
    pub fn start(&mut self) {
        let receiver = Arc::clone(&self.receiver);
        let (shutdown_sender, shutdown_receiver) = unbounded();
        self.shutdown_sender = Some(shutdown_sender);

        self.thread_handle = Some(thread::spawn(move || {
            let green = Style::new().green().bold();
            let red = Style::new().red().bold();

            loop {
                select! {
                    recv(receiver) -> msg => {
                        match msg {
                            Ok(message) => print_message(&message, &green, &red),
                            Err(_) => break, // All senders dropped.
                        }
                    }
                    recv(shutdown_receiver) -> _ => {
                        for message in receiver.try_iter() {
                            print_message(&message, &green, &red);
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
            thread::sleep(Duration::from_millis(100)); // Lets wait a little bit to receive pending msgs.
            let _ = sender.send(()); // Signal shutdown.
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}
