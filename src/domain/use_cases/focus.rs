use std::future::Future;

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::debug;

/// Source of "the host window regained focus" notifications.
#[derive(Debug, Clone)]
pub struct FocusEvents {
    sender: broadcast::Sender<()>,
}

impl Default for FocusEvents {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(16);
        FocusEvents { sender }
    }
}

impl FocusEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals a focus gain. Returns how many subscribers were notified.
    pub fn notify(&self) -> usize {
        self.sender.send(()).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Runs `handler` once per focus event until the returned guard drops.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe<F, Fut>(&self, handler: F) -> FocusSubscription
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut receiver = self.sender.subscribe();

        let task = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(()) => handler().await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // missed events collapse into one refresh
                        debug!(skipped, "focus events lagged");
                        handler().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        FocusSubscription { task }
    }
}

/// Keeps a focus handler alive. Dropping it aborts the handler task.
#[derive(Debug)]
pub struct FocusSubscription {
    task: JoinHandle<()>,
}

impl Drop for FocusSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
