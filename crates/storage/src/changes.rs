//! Change notification without delta payloads.
//!
//! Every repository mutation publishes which table changed and nothing
//! else; consumers respond by reloading the full set. Dropping the
//! receiver unsubscribes.

use tokio::sync::broadcast;

/// Which table changed. No row data travels with the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableChange {
    Questions,
    Scores,
}

/// Fan-out channel for table change signals.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        // Lagged receivers only miss redundant resync prompts, so a small
        // buffer is enough.
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.sender.subscribe()
    }

    /// Publish a change. Send errors mean nobody is listening, which is
    /// fine.
    pub fn publish(&self, change: TableChange) {
        let _ = self.sender.send(change);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
