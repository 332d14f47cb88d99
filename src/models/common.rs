use crate::models::{AdminGiftResponse, AdminSessionResponse, Gift};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(
    GiftApiResponse = ApiResponse<Gift>,
    GiftListApiResponse = ApiResponse<Vec<Gift>>,
    AdminGiftListApiResponse = ApiResponse<Vec<AdminGiftResponse>>,
    AdminSessionApiResponse = ApiResponse<AdminSessionResponse>
)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
