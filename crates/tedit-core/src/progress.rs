//! Single-slot progress publication.

use std::sync::Arc;

use tedit_world::Progress;
use tokio::sync::watch;

/// Holds the most recent [`Progress`] value.
///
/// Background work publishes through a clone; observers hold a
/// [`watch::Receiver`] and see only the latest value. Intermediate values may
/// be skipped by slow observers.
#[derive(Debug, Clone)]
pub struct ProgressPublisher {
    sender: Arc<watch::Sender<Progress>>,
}

impl Default for ProgressPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPublisher {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Progress::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replace the current value and wake observers.
    pub fn publish(&self, progress: Progress) {
        self.sender.send_replace(progress);
    }

    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.sender.subscribe()
    }

    pub fn latest(&self) -> Progress {
        self.sender.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_observers() {
        let publisher = ProgressPublisher::new();
        publisher.publish(Progress::new(40, "Halfway"));
        assert_eq!(publisher.latest(), Progress::new(40, "Halfway"));
    }

    #[tokio::test]
    async fn test_observer_sees_latest_value() {
        let publisher = ProgressPublisher::new();
        let mut receiver = publisher.subscribe();

        let worker = publisher.clone();
        tokio::task::spawn_blocking(move || {
            worker.publish(Progress::new(10, "Generating World..."));
            worker.publish(Progress::new(90, "Generating World..."));
        })
        .await
        .unwrap();

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().percent, 90);
    }
}
