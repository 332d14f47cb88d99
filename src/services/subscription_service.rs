use crate::database::GiftStore;
use crate::error::AppResult;
use crate::models::Gift;
use futures_util::Stream;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// What happened to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftChange {
    Created(String),
    Updated(String),
    Claimed(String),
    Deleted(String),
}

/// Fans write notifications out to every open subscription.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn GiftStore>,
    sender: broadcast::Sender<GiftChange>,
    open: Arc<AtomicUsize>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn GiftStore>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            store,
            sender,
            open: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn publish(&self, change: GiftChange) {
        // no receivers is fine
        let receivers = self.sender.send(change.clone()).unwrap_or(0);
        log::debug!("Published {change:?} to {receivers} subscription(s)");
    }

    /// Opens a subscription; its first snapshot is the current collection.
    pub fn subscribe(&self) -> GiftSubscription {
        let open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Gift subscription opened ({open} open)");
        GiftSubscription {
            store: self.store.clone(),
            receiver: self.sender.subscribe(),
            initial_sent: false,
            open: self.open.clone(),
        }
    }

    pub fn open_subscriptions(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// A live view of the ordered gift collection. Dropping it unsubscribes.
pub struct GiftSubscription {
    store: Arc<dyn GiftStore>,
    receiver: broadcast::Receiver<GiftChange>,
    initial_sent: bool,
    open: Arc<AtomicUsize>,
}

impl GiftSubscription {
    /// Waits for the next snapshot. `None` once the feed has shut down.
    pub async fn next_snapshot(&mut self) -> Option<AppResult<Vec<Gift>>> {
        if !self.initial_sent {
            self.initial_sent = true;
            return Some(self.store.list().await);
        }

        match self.receiver.recv().await {
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                // a full snapshot covers everything we missed
                log::debug!("Subscription lagged by {skipped} change(s)");
            }
            Err(RecvError::Closed) => return None,
        }
        // collapse a burst of writes into one snapshot
        while let Ok(_) | Err(TryRecvError::Lagged(_)) = self.receiver.try_recv() {}

        Some(self.store.list().await)
    }

    pub fn into_stream(self) -> impl Stream<Item = AppResult<Vec<Gift>>> {
        futures_util::stream::unfold(self, |mut sub| async move {
            sub.next_snapshot().await.map(|snapshot| (snapshot, sub))
        })
    }
}

impl Drop for GiftSubscription {
    fn drop(&mut self) {
        let open = self.open.fetch_sub(1, Ordering::SeqCst) - 1;
        log::info!("Gift subscription closed ({open} open)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryGiftStore;
    use crate::models::GiftInput;

    async fn seed(store: &MemoryGiftStore, name: &str, created_at: i64) -> Gift {
        let details = GiftInput {
            name: name.to_string(),
            description: "d".to_string(),
            image_url: "https://img.example/a.jpg".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        store.insert(Gift::new(details, created_at)).await.unwrap()
    }

    #[tokio::test]
    async fn test_first_snapshot_is_current_collection() {
        let store = Arc::new(MemoryGiftStore::new());
        seed(&store, "crib", 1).await;
        let service = SubscriptionService::new(store.clone(), 8);

        let mut sub = service.subscribe();
        let snapshot = sub.next_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "crib");
    }

    #[tokio::test]
    async fn test_change_delivers_fresh_snapshot() {
        let store = Arc::new(MemoryGiftStore::new());
        let service = SubscriptionService::new(store.clone(), 8);
        let mut sub = service.subscribe();
        assert!(sub.next_snapshot().await.unwrap().unwrap().is_empty());

        let g = seed(&store, "stroller", 5).await;
        service.publish(GiftChange::Created(g.id.clone()));

        let snapshot = sub.next_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, g.id);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_still_gets_latest_snapshot() {
        let store = Arc::new(MemoryGiftStore::new());
        let service = SubscriptionService::new(store.clone(), 1);
        let mut sub = service.subscribe();
        sub.next_snapshot().await.unwrap().unwrap();

        for i in 0..5 {
            let g = seed(&store, &format!("gift-{i}"), i).await;
            service.publish(GiftChange::Created(g.id));
        }

        let snapshot = sub.next_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].name, "gift-4");
    }

    #[tokio::test]
    async fn test_drop_releases_subscription() {
        let store = Arc::new(MemoryGiftStore::new());
        let service = SubscriptionService::new(store, 8);
        let a = service.subscribe();
        let b = service.subscribe();
        assert_eq!(service.open_subscriptions(), 2);
        drop(a);
        assert_eq!(service.open_subscriptions(), 1);
        drop(b);
        assert_eq!(service.open_subscriptions(), 0);
    }
}
