//! Shutdown coordination.
//!
//! One broadcast channel fans a single stop request out to the HTTP
//! server. The request comes either from an OS signal, once
//! [`Shutdown::trigger_on_signal`] is armed, or from [`Shutdown::trigger`]
//! when an embedding test wants the server gone.

use tokio::sync::broadcast;

use crate::lifecycle::signals::shutdown_signal;

/// Stop switch shared by the server and whoever owns its lifetime.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once shutdown is requested.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request shutdown. A no-op when nothing is subscribed.
    pub fn trigger(&self) {
        if self.tx.send(()).is_ok() {
            tracing::info!("Shutdown requested");
        }
    }

    /// Trigger on the first SIGINT/SIGTERM. Call from inside the runtime.
    pub fn trigger_on_signal(&self) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown.trigger();
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
