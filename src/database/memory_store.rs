use super::store::{GiftStore, gift_not_found};
use crate::error::AppResult;
use crate::models::{Gift, GiftDetails};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store, used by `DATABASE_URL=memory://` and in tests.
#[derive(Default)]
pub struct MemoryGiftStore {
    // insertion order; listing sorts a copy
    gifts: RwLock<Vec<Gift>>,
}

impl MemoryGiftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GiftStore for MemoryGiftStore {
    async fn list(&self) -> AppResult<Vec<Gift>> {
        let gifts = self.gifts.read().await;
        // newest insert first on equal timestamps; sort_by is stable
        let mut snapshot: Vec<Gift> = gifts.iter().rev().cloned().collect();
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(snapshot)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Gift>> {
        let gifts = self.gifts.read().await;
        Ok(gifts.iter().find(|g| g.id == id).cloned())
    }

    async fn insert(&self, gift: Gift) -> AppResult<Gift> {
        let mut gifts = self.gifts.write().await;
        gifts.push(gift.clone());
        Ok(gift)
    }

    async fn update_details(&self, id: &str, details: GiftDetails) -> AppResult<Gift> {
        let mut gifts = self.gifts.write().await;
        let gift = gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| gift_not_found(id))?;
        gift.apply_details(details);
        Ok(gift.clone())
    }

    async fn claim(&self, id: &str, guest_name: &str) -> AppResult<Gift> {
        // read and write under one write lock
        let mut gifts = self.gifts.write().await;
        let gift = gifts
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| gift_not_found(id))?;
        gift.claimed_by = gift.claimed_with(guest_name)?;
        Ok(gift.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut gifts = self.gifts.write().await;
        let before = gifts.len();
        gifts.retain(|g| g.id != id);
        if gifts.len() == before {
            return Err(gift_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::GiftInput;

    fn gift(name: &str, created_at: i64, shared: bool) -> Gift {
        let details = GiftInput {
            name: name.to_string(),
            description: format!("{name} description"),
            image_url: "https://img.example/a.jpg".to_string(),
            is_shared: shared,
            ..Default::default()
        }
        .validate()
        .unwrap();
        Gift::new(details, created_at)
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_desc() {
        let store = MemoryGiftStore::new();
        store.insert(gift("old", 1, false)).await.unwrap();
        store.insert(gift("new", 3, false)).await.unwrap();
        store.insert(gift("mid", 2, false)).await.unwrap();
        store.insert(gift("mid-later", 2, false)).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["new", "mid-later", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_claim_and_delete_unknown_id() {
        let store = MemoryGiftStore::new();
        assert!(matches!(
            store.claim("missing", "Ana").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_claim_leaves_record_untouched() {
        let store = MemoryGiftStore::new();
        let g = store.insert(gift("blanket", 1, true)).await.unwrap();
        store.claim(&g.id, "Ana").await.unwrap();
        assert!(store.claim(&g.id, "Ana").await.is_err());
        let stored = store.get(&g.id).await.unwrap().unwrap();
        assert_eq!(stored.claimed_by, vec!["Ana".to_string()]);
    }
}
