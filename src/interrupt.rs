//! User interruption signal shared by the crawl driver and the downloader.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle that flips once from "running" to "interrupted".
///
/// The binary triggers it from Ctrl-C. Long-running awaits race against
/// [`Interrupt::triggered`] so in-flight requests are abandoned immediately;
/// loops check [`Interrupt::is_triggered`] between items.
#[derive(Debug, Clone)]
pub struct Interrupt {
    flag: Arc<watch::Sender<bool>>,
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt {
    #[must_use]
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    /// Marks the run as interrupted. Idempotent.
    pub fn trigger(&self) {
        self.flag.send_replace(true);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.flag.borrow()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called.
    pub async fn triggered(&self) {
        let mut receiver = self.flag.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|interrupted| *interrupted).await;
    }
}
