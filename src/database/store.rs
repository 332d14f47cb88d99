use crate::error::AppResult;
use crate::models::{Gift, GiftDetails};
use async_trait::async_trait;

/// Persistence capability for the gift collection.
///
/// Implementations must apply [`GiftStore::claim`] atomically: the claimant
/// list is re-read and rewritten as one step so concurrent claims on a
/// shared gift never drop a name.
#[async_trait]
pub trait GiftStore: Send + Sync {
    /// All gifts, newest `created_at` first.
    async fn list(&self) -> AppResult<Vec<Gift>>;

    async fn get(&self, id: &str) -> AppResult<Option<Gift>>;

    async fn insert(&self, gift: Gift) -> AppResult<Gift>;

    /// Overwrites the admin-editable fields of an existing gift.
    async fn update_details(&self, id: &str, details: GiftDetails) -> AppResult<Gift>;

    /// Adds `guest_name` to the claimants following the shared/non-shared rule.
    async fn claim(&self, id: &str, guest_name: &str) -> AppResult<Gift>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub(crate) fn gift_not_found(id: &str) -> crate::error::AppError {
    crate::error::AppError::NotFound(format!("Gift {id} not found"))
}
