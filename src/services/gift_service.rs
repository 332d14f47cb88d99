use crate::database::GiftStore;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{GiftChange, SubscriptionService};
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct GiftService {
    store: Arc<dyn GiftStore>,
    subscriptions: SubscriptionService,
}

impl GiftService {
    pub fn new(store: Arc<dyn GiftStore>, subscriptions: SubscriptionService) -> Self {
        Self {
            store,
            subscriptions,
        }
    }

    pub fn subscriptions(&self) -> &SubscriptionService {
        &self.subscriptions
    }

    /// Gifts ordered newest first.
    pub async fn list_gifts(&self) -> AppResult<Vec<Gift>> {
        self.store.list().await
    }

    pub async fn get_gift(&self, gift_id: &str) -> AppResult<Gift> {
        self.store
            .get(gift_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gift {gift_id} not found")))
    }

    /// Guest claim. The name is checked against the stored claimant list
    /// inside the store's atomic claim.
    pub async fn claim_gift(&self, gift_id: &str, request: ClaimGiftRequest) -> AppResult<Gift> {
        let guest_name = normalize_guest_name(&request.guest_name)?;

        let gift = self.store.claim(gift_id, &guest_name).await.map_err(|e| {
            if let AppError::DatabaseError(err) = &e {
                log::error!("Failed to claim gift {gift_id}: {err}");
            }
            e
        })?;

        log::info!(
            "Gift {} claimed by {} ({} claimant(s))",
            gift.id,
            guest_name,
            gift.claimed_by.len()
        );
        self.subscriptions.publish(GiftChange::Claimed(gift.id.clone()));
        Ok(gift)
    }

    pub async fn create_gift(&self, input: GiftInput) -> AppResult<Gift> {
        let details = input.validate()?;
        let gift = Gift::new(details, Utc::now().timestamp_millis());

        let gift = self.store.insert(gift).await?;

        log::info!("Gift {} created: {}", gift.id, gift.name);
        self.subscriptions.publish(GiftChange::Created(gift.id.clone()));
        Ok(gift)
    }

    /// Replaces the editable fields; claims and creation time are kept.
    pub async fn update_gift(&self, gift_id: &str, input: GiftInput) -> AppResult<Gift> {
        let details = input.validate()?;

        let gift = self.store.update_details(gift_id, details).await?;

        log::info!("Gift {} updated", gift.id);
        self.subscriptions.publish(GiftChange::Updated(gift.id.clone()));
        Ok(gift)
    }

    pub async fn delete_gift(&self, gift_id: &str) -> AppResult<()> {
        self.store.delete(gift_id).await?;

        log::info!("Gift {gift_id} deleted");
        self.subscriptions
            .publish(GiftChange::Deleted(gift_id.to_string()));
        Ok(())
    }
}
