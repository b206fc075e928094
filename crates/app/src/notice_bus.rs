//! In-process notice bus backed by a tokio broadcast channel.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use homedash_domain::notice::Notice;

use crate::ports::NoticePublisher;

/// In-process notice bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notice is simply dropped from the channel). The most recent
/// notices are also kept in a bounded history for late readers.
pub struct InProcessNoticeBus {
    sender: broadcast::Sender<Notice>,
    history: Mutex<VecDeque<Notice>>,
    capacity: usize,
}

impl InProcessNoticeBus {
    /// Create a new bus; `capacity` bounds both the channel and the history.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (see [`broadcast::channel`]).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Subscribe to notices on this bus.
    ///
    /// Returns a receiver that will get all notices published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Up to `limit` most recent notices, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<Notice> {
        self.lock_history().iter().rev().take(limit).cloned().collect()
    }

    fn lock_history(&self) -> MutexGuard<'_, VecDeque<Notice>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoticePublisher for InProcessNoticeBus {
    fn publish(&self, notice: Notice) -> impl Future<Output = ()> + Send {
        {
            let mut history = self.lock_history();
            if history.len() == self.capacity {
                history.pop_front();
            }
            history.push_back(notice.clone());
        }
        // Fails only when nobody is subscribed.
        let _ = self.sender.send(notice);
        async {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::error::{HomeDashError, ValidationError};

    fn notice(device: &str) -> Notice {
        Notice::rejected(
            "garden",
            device,
            None,
            &HomeDashError::Validation(ValidationError::EmptyName),
        )
    }

    #[tokio::test]
    async fn should_deliver_notice_to_subscriber() {
        let bus = InProcessNoticeBus::new(16);
        let mut rx = bus.subscribe();

        let n = notice("lighting-1");
        let id = n.id;
        bus.publish(n).await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, id);
    }

    #[tokio::test]
    async fn should_deliver_notice_to_multiple_subscribers() {
        let bus = InProcessNoticeBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let n = notice("lighting-1");
        let id = n.id;
        bus.publish(n).await;

        assert_eq!(rx1.recv().await.unwrap().id, id);
        assert_eq!(rx2.recv().await.unwrap().id, id);
    }

    #[tokio::test]
    async fn should_not_deliver_notices_published_before_subscription() {
        let bus = InProcessNoticeBus::new(16);
        bus.publish(notice("early")).await;

        let mut rx = bus.subscribe();
        let later = notice("later");
        let later_id = later.id;
        bus.publish(later).await;

        assert_eq!(rx.recv().await.unwrap().id, later_id);
    }

    #[tokio::test]
    async fn should_keep_bounded_history_newest_first() {
        let bus = InProcessNoticeBus::new(2);
        bus.publish(notice("a")).await;
        bus.publish(notice("b")).await;
        bus.publish(notice("c")).await;

        let recent: Vec<_> = bus
            .recent(10)
            .into_iter()
            .map(|n| n.device_id.to_string())
            .collect();
        assert_eq!(recent, ["c", "b"]);
        assert_eq!(bus.recent(1).len(), 1);
    }
}
