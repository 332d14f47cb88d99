use crate::error::{AppError, AppResult};
use crate::utils::{compact_links, validate_http_url};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registry entry guests may claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub purchase_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_links: Option<Vec<String>>,
    pub is_shared: bool,
    #[serde(default)]
    pub claimed_by: Vec<String>,
    /// epoch millis
    pub created_at: i64,
}

impl Gift {
    /// Builds a fresh, unclaimed gift.
    pub fn new(details: GiftDetails, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: details.name,
            description: details.description,
            image_url: details.image_url,
            image_urls: details.image_urls,
            purchase_link: details.purchase_link,
            purchase_links: details.purchase_links,
            is_shared: details.is_shared,
            claimed_by: Vec::new(),
            created_at,
        }
    }

    /// Overwrites the admin-editable fields. id, created_at and claimed_by stay.
    pub fn apply_details(&mut self, details: GiftDetails) {
        self.name = details.name;
        self.description = details.description;
        self.image_url = details.image_url;
        self.image_urls = details.image_urls;
        self.purchase_link = details.purchase_link;
        self.purchase_links = details.purchase_links;
        self.is_shared = details.is_shared;
    }

    /// Primary image followed by the extra ones.
    pub fn all_images(&self) -> Vec<String> {
        let mut images = vec![self.image_url.clone()];
        if let Some(extra) = &self.image_urls {
            images.extend(extra.iter().cloned());
        }
        images
    }

    pub fn all_purchase_links(&self) -> Vec<String> {
        std::iter::once(&self.purchase_link)
            .chain(self.purchase_links.iter().flatten())
            .filter(|l| !l.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn is_claimed(&self) -> bool {
        !self.claimed_by.is_empty()
    }

    /// Claimant list after `guest_name` claims this gift.
    pub fn claimed_with(&self, guest_name: &str) -> AppResult<Vec<String>> {
        claim_list(self.is_shared, &self.claimed_by, guest_name)
    }
}

/// Trims a guest name, rejecting blank input.
pub fn normalize_guest_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError(
            "Please enter your name".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Shared gifts append the guest, others are handed to the latest claimant.
/// A name already on the list (exact match) is rejected.
pub fn claim_list(is_shared: bool, current: &[String], guest_name: &str) -> AppResult<Vec<String>> {
    let name = normalize_guest_name(guest_name)?;

    if current.iter().any(|c| *c == name) {
        return Err(AppError::ValidationError(
            "This name has already claimed this gift".to_string(),
        ));
    }

    if is_shared {
        let mut next = current.to_vec();
        next.push(name);
        Ok(next)
    } else {
        Ok(vec![name])
    }
}

/// Admin form payload for create and edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiftInput {
    #[schema(example = "Baby crib")]
    pub name: String,
    #[schema(example = "White wooden crib, mattress included")]
    pub description: String,
    #[schema(example = "https://example.com/crib.jpg")]
    pub image_url: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub purchase_link: Option<String>,
    #[serde(default)]
    pub purchase_links: Vec<String>,
    #[serde(default)]
    pub is_shared: bool,
}

/// Validated, normalized admin-editable fields of a gift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftDetails {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub image_urls: Option<Vec<String>>,
    pub purchase_link: String,
    pub purchase_links: Option<Vec<String>>,
    pub is_shared: bool,
}

impl GiftInput {
    pub fn validate(self) -> AppResult<GiftDetails> {
        let name = self.name.trim();
        let description = self.description.trim();
        let image_url = self.image_url.trim();

        if name.is_empty() || description.is_empty() || image_url.is_empty() {
            return Err(AppError::ValidationError(
                "Name, description and main image URL are required".to_string(),
            ));
        }
        validate_http_url("imageUrl", image_url)?;

        let purchase_link = self
            .purchase_link
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if !purchase_link.is_empty() {
            validate_http_url("purchaseLink", &purchase_link)?;
        }

        Ok(GiftDetails {
            name: name.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            image_urls: compact_links("imageUrls", &self.image_urls)?,
            purchase_link,
            purchase_links: compact_links("purchaseLinks", &self.purchase_links)?,
            is_shared: self.is_shared,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimGiftRequest {
    #[schema(example = "Maria")]
    pub guest_name: String,
}

/// Admin list row: the gift plus the counters the panel shows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminGiftResponse {
    #[serde(flatten)]
    pub gift: Gift,
    pub photo_count: usize,
    pub link_count: usize,
}

impl From<Gift> for AdminGiftResponse {
    fn from(gift: Gift) -> Self {
        Self {
            photo_count: gift.all_images().len(),
            link_count: gift.all_purchase_links().len(),
            gift,
        }
    }
}
