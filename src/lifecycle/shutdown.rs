//! Stop signal for background probing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Clonable stop handle shared by the health monitor and the signal task.
///
/// Fires at most once; receivers subscribed before the first trigger are
/// woken.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Wake every subscriber. Later calls do nothing.
    pub fn trigger(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::debug!(listeners, "Shutdown triggered");
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
