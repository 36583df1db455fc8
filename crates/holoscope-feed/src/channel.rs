//! Single-writer, single-reader handoff of the newest value.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::fix::FeedError;

/// Create a connected publisher/reader pair.
pub fn latest_value_channel<T>() -> (FeedPublisher<T>, LatestValue<T>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (
        FeedPublisher { tx },
        LatestValue {
            rx,
            latest: None,
            disconnected: false,
        },
    )
}

/// Writing end, owned by the fetcher thread.
#[derive(Debug)]
pub struct FeedPublisher<T> {
    tx: Sender<T>,
}

impl<T> FeedPublisher<T> {
    pub fn publish(&self, value: T) -> Result<(), FeedError> {
        self.tx.send(value).map_err(|_| FeedError::Disconnected)
    }
}

/// Reading end, owned by the frame loop.
#[derive(Debug)]
pub struct LatestValue<T> {
    rx: Receiver<T>,
    latest: Option<T>,
    disconnected: bool,
}

impl<T> LatestValue<T> {
    /// Drain everything published since the last call and keep the newest.
    /// Returns `true` when a new value arrived. The previous value is kept
    /// when nothing did.
    pub fn poll(&mut self) -> bool {
        let mut updated = false;
        loop {
            match self.rx.try_recv() {
                Ok(value) => {
                    self.latest = Some(value);
                    updated = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        tracing::warn!("feed publisher dropped, keeping last value");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        updated
    }

    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}
