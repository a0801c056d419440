// Change signal for the entry collection

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Payload-free "entries changed" broadcast
///
/// Subscribers re-read the store when signalled. Lagged receivers only miss
/// duplicate signals, which is harmless.
#[derive(Clone)]
pub struct EntryEvents {
    tx: broadcast::Sender<()>,
}

impl Default for EntryEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal subscribers; a no-op when nobody listens
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_signal() {
        let events = EntryEvents::new();
        events.notify();

        let mut first = events.subscribe();
        let mut second = events.subscribe();
        assert_eq!(events.subscriber_count(), 2);

        events.notify();
        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
        assert!(first.try_recv().is_err());
    }
}
