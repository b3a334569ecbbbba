use std::{
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, select, unbounded};

/// Forwards a message to every live subscriber and forgets the ones that hung up.
fn forward<T: Clone>(subscribers: &Mutex<Vec<Sender<T>>>, value: T) {
    if let Ok(mut lock) = subscribers.lock() {
        lock.retain(|sender| sender.send(value.clone()).is_ok());
    }
}

/// Defines a `MsgDispatcher`.
///
/// Sends messages from a source to all subscribers.
pub struct MsgDispatcher<T: Send + Sync + Clone + 'static> {
    source: Receiver<T>,
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
    shutdown_sender: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

/// Methods of `MsgDispatcher`.
impl<T: Send + Sync + Clone + 'static> MsgDispatcher<T> {
    /// Creates a `MsgDispatcher`.
    /// Receives messages from source and sends them to the
    /// subscribed receivers.
    pub fn new(source: Receiver<T>) -> Self {
        Self {
            source,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            shutdown_sender: None,
            thread_handle: None,
        }
    }

    /// Returns a subscribed message receiver.
    ///
    /// A subscriber only sees messages dispatched after it subscribed.
    pub fn subscribe(&self) -> Receiver<T> {
        let (sender, receiver) = unbounded();

        if let Ok(mut lock) = self.subscribers.lock() {
            lock.push(sender);
        }

        receiver
    }

    /// Starts the `MsgDispatcher`.
    pub fn start(&mut self) {
        let source = self.source.clone();
        let subscribers = Arc::clone(&self.subscribers);
        let (shutdown_sender, shutdown_receiver) = unbounded();
        self.shutdown_sender = Some(shutdown_sender);

        self.thread_handle = Some(thread::spawn(move || {
            loop {
                select! {
                    recv(source) -> msg => {
                        match msg {
                            Ok(value) => forward(&subscribers, value),
                            Err(_) => break, // Source closed.
                        }
                    }
                    recv(shutdown_receiver) -> _ => {
                        // Hand out what is still queued before leaving.
                        for value in source.try_iter() {
                            forward(&subscribers, value);
                        }
                        break;
                    }
                }
            }
        }));
    }

    /// Stops the `MsgDispatcher`.
    ///
    /// Every message sent before the call is delivered to the subscribers.
    pub fn stop(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            // Signal shutdown.
            let _ = sender.send(());
        }

        if let Some(handle) = self.thread_handle.take() {
            // Wait for thread to finish.
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_gets_every_message() {
        let (sender, receiver) = unbounded::<u32>();
        let mut dispatcher = MsgDispatcher::new(receiver);

        let first = dispatcher.subscribe();
        let second = dispatcher.subscribe();

        dispatcher.start();

        for value in 0..5 {
            sender.send(value).unwrap();
        }

        dispatcher.stop();

        assert_eq!(first.try_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(second.try_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn dropped_subscribers_do_not_block_others() {
        let (sender, receiver) = unbounded::<&'static str>();
        let mut dispatcher = MsgDispatcher::new(receiver);

        let kept = dispatcher.subscribe();
        drop(dispatcher.subscribe());

        dispatcher.start();
        sender.send("hello").unwrap();
        dispatcher.stop();

        assert_eq!(kept.try_iter().collect::<Vec<_>>(), vec!["hello"]);
    }
}
