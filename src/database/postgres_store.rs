use super::store::{GiftStore, gift_not_found};
use crate::entities::{StringList, gift_entity as gifts};
use crate::error::AppResult;
use crate::models::{Gift, GiftDetails};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

#[derive(Clone)]
pub struct PostgresGiftStore {
    pool: DatabaseConnection,
}

impl PostgresGiftStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

fn set_details(model: &mut gifts::ActiveModel, details: GiftDetails) {
    model.name = Set(details.name);
    model.description = Set(details.description);
    model.image_url = Set(details.image_url);
    model.image_urls = Set(details.image_urls.map(StringList));
    model.purchase_link = Set(details.purchase_link);
    model.purchase_links = Set(details.purchase_links.map(StringList));
    model.is_shared = Set(details.is_shared);
}

#[async_trait]
impl GiftStore for PostgresGiftStore {
    async fn list(&self) -> AppResult<Vec<Gift>> {
        let rows = gifts::Entity::find()
            .order_by_desc(gifts::Column::CreatedAt)
            .order_by_desc(gifts::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Gift::from).collect())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Gift>> {
        let row = gifts::Entity::find_by_id(id.to_string())
            .one(&self.pool)
            .await?;
        Ok(row.map(Gift::from))
    }

    async fn insert(&self, gift: Gift) -> AppResult<Gift> {
        let inserted = gifts::ActiveModel {
            id: Set(gift.id),
            name: Set(gift.name),
            description: Set(gift.description),
            image_url: Set(gift.image_url),
            image_urls: Set(gift.image_urls.map(StringList)),
            purchase_link: Set(gift.purchase_link),
            purchase_links: Set(gift.purchase_links.map(StringList)),
            is_shared: Set(gift.is_shared),
            claimed_by: Set(StringList(gift.claimed_by)),
            created_at: Set(gift.created_at),
        }
        .insert(&self.pool)
        .await?;
        Ok(inserted.into())
    }

    async fn update_details(&self, id: &str, details: GiftDetails) -> AppResult<Gift> {
        let mut model = gifts::Entity::find_by_id(id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| gift_not_found(id))?
            .into_active_model();
        set_details(&mut model, details);
        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    async fn claim(&self, id: &str, guest_name: &str) -> AppResult<Gift> {
        let txn = self.pool.begin().await?;

        // row lock: a concurrent claim waits and then sees our write
        let current: Gift = gifts::Entity::find_by_id(id.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| gift_not_found(id))?
            .into();
        let claimed_by = current.claimed_with(guest_name)?;

        let model = gifts::ActiveModel {
            id: Set(current.id.clone()),
            claimed_by: Set(StringList(claimed_by)),
            ..Default::default()
        };
        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(updated.into())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let res = gifts::Entity::delete_by_id(id.to_string())
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(gift_not_found(id));
        }
        Ok(())
    }
}
