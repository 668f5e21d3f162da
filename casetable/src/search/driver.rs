//! Debounce driver for tokio hosts.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Timer-backed debounce that delivers committed values over a channel.
///
/// Each [`schedule`](AsyncDebouncer::schedule) cancels the previously sleeping
/// task and spawns a new one, so at most one timer is live. Dropping the
/// debouncer cancels the pending timer.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct AsyncDebouncer<T> {
    delay: Duration,
    pending: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> AsyncDebouncer<T> {
    /// Create a debouncer and the receiver its committed values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                pending: None,
                tx,
            },
            rx,
        )
    }

    /// Schedule `value`, replacing any pending one.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver dropped means the view is gone.
                    let _ = tx.send(value);
                }
            }
        });

        self.pending = Some(token);
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for AsyncDebouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
