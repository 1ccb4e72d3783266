use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Cancellation scope tied to a screen's lifetime.
///
/// Clones share the same state: cancelling any clone cancels them all.
#[derive(Debug, Clone)]
pub struct ScreenScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            cancelled: Arc::new(tx),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Drives `fut` unless the scope is (or becomes) cancelled first, in
    /// which case `fut` is dropped and `None` is returned.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut rx = self.cancelled.subscribe();
        if *rx.borrow_and_update() {
            return None;
        }

        let cancelled = async move {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => None,
            out = fut => Some(out),
        }
    }
}
