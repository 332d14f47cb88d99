use crate::error::AppResult;
use crate::models::*;
use crate::services::{AuthService, GiftService};
use async_trait::async_trait;

/// Writes the views issue. Implemented in-process by [`GiftService`]; an
/// HTTP client would implement it against the REST routes.
#[async_trait]
pub trait GiftCommands: Send + Sync {
    async fn claim_gift(&self, gift_id: &str, guest_name: &str) -> AppResult<Gift>;
    async fn create_gift(&self, input: GiftInput) -> AppResult<Gift>;
    async fn update_gift(&self, gift_id: &str, input: GiftInput) -> AppResult<Gift>;
    async fn delete_gift(&self, gift_id: &str) -> AppResult<()>;
}

pub trait SessionCommands {
    fn open_session(&self, password: &str) -> AppResult<AdminSessionResponse>;
}

#[async_trait]
impl GiftCommands for GiftService {
    async fn claim_gift(&self, gift_id: &str, guest_name: &str) -> AppResult<Gift> {
        let request = ClaimGiftRequest {
            guest_name: guest_name.to_string(),
        };
        GiftService::claim_gift(self, gift_id, request).await
    }

    async fn create_gift(&self, input: GiftInput) -> AppResult<Gift> {
        GiftService::create_gift(self, input).await
    }

    async fn update_gift(&self, gift_id: &str, input: GiftInput) -> AppResult<Gift> {
        GiftService::update_gift(self, gift_id, input).await
    }

    async fn delete_gift(&self, gift_id: &str) -> AppResult<()> {
        GiftService::delete_gift(self, gift_id).await
    }
}

impl SessionCommands for AuthService {
    fn open_session(&self, password: &str) -> AppResult<AdminSessionResponse> {
        self.login(AdminLoginRequest {
            password: password.to_string(),
        })
    }
}
