//! State behind the admin panel: the create/edit form, the edit target and
//! the delete confirmation.

use super::Notice;
use super::backend::GiftCommands;
use crate::error::{AppError, AppResult};
use crate::models::{Gift, GiftInput};
use crate::utils::MAX_SECONDARY_LINKS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub image_urls: [String; MAX_SECONDARY_LINKS],
    pub purchase_link: String,
    pub purchase_links: [String; MAX_SECONDARY_LINKS],
    pub is_shared: bool,
}

fn slots(values: Option<&Vec<String>>) -> [String; MAX_SECONDARY_LINKS] {
    let mut out: [String; MAX_SECONDARY_LINKS] = Default::default();
    for (slot, value) in out.iter_mut().zip(values.into_iter().flatten()) {
        *slot = value.clone();
    }
    out
}

impl GiftForm {
    /// Loads a gift for editing; extra images and links fill four slots.
    pub fn from_gift(gift: &Gift) -> Self {
        Self {
            name: gift.name.clone(),
            description: gift.description.clone(),
            image_url: gift.image_url.clone(),
            image_urls: slots(gift.image_urls.as_ref()),
            purchase_link: gift.purchase_link.clone(),
            purchase_links: slots(gift.purchase_links.as_ref()),
            is_shared: gift.is_shared,
        }
    }

    pub fn to_input(&self) -> GiftInput {
        GiftInput {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            image_urls: self.image_urls.to_vec(),
            purchase_link: Some(self.purchase_link.clone()),
            purchase_links: self.purchase_links.to_vec(),
            is_shared: self.is_shared,
        }
    }

    fn missing_required(&self) -> bool {
        self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.image_url.trim().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct AdminPanel {
    pub form: GiftForm,
    gifts: Vec<Gift>,
    editing: Option<String>,
    pending_delete: Option<String>,
    saving: bool,
    notice: Option<Notice>,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn apply_snapshot(&mut self, gifts: Vec<Gift>) {
        self.gifts = gifts;
    }

    pub fn edit(&mut self, gift: &Gift) {
        self.form = GiftForm::from_gift(gift);
        self.editing = Some(gift.id.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = GiftForm::default();
    }

    /// Creates a gift, or updates the edit target. The form resets only on
    /// success; on failure everything typed is kept.
    pub async fn submit(&mut self, backend: &dyn GiftCommands) -> AppResult<Gift> {
        if self.form.missing_required() {
            let err = AppError::ValidationError(
                "Please fill in all required fields".to_string(),
            );
            self.notice = Some(Notice::Error(err.to_string()));
            return Err(err);
        }

        self.saving = true;
        let input = self.form.to_input();
        let result = match self.editing.as_deref() {
            Some(id) => backend.update_gift(id, input).await,
            None => backend.create_gift(input).await,
        };
        self.saving = false;

        match result {
            Ok(gift) => {
                let message = if self.editing.is_some() {
                    "Gift updated successfully"
                } else {
                    "Gift added successfully"
                };
                self.notice = Some(Notice::Success(message.to_string()));
                self.cancel_edit();
                Ok(gift)
            }
            Err(e) => {
                log::error!("Error saving gift: {e}");
                self.notice = Some(Notice::Error(
                    "Could not save the gift. Please try again.".to_string(),
                ));
                Err(e)
            }
        }
    }

    /// First step of a delete; nothing is removed until confirmed.
    pub fn request_delete(&mut self, gift_id: &str) {
        self.pending_delete = Some(gift_id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, backend: &dyn GiftCommands) -> AppResult<()> {
        let Some(gift_id) = self.pending_delete.take() else {
            return Err(AppError::ValidationError(
                "No gift selected for deletion".to_string(),
            ));
        };

        match backend.delete_gift(&gift_id).await {
            Ok(()) => {
                self.notice = Some(Notice::Success("Gift deleted successfully".to_string()));
                if self.editing.as_deref() == Some(gift_id.as_str()) {
                    self.cancel_edit();
                }
                Ok(())
            }
            Err(e) => {
                log::error!("Error deleting gift {gift_id}: {e}");
                self.notice = Some(Notice::Error("Could not delete the gift".to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{GiftStore, MemoryGiftStore};
    use crate::services::{GiftService, SubscriptionService};
    use std::sync::Arc;

    fn service() -> GiftService {
        let store: Arc<dyn GiftStore> = Arc::new(MemoryGiftStore::new());
        GiftService::new(store.clone(), SubscriptionService::new(store, 8))
    }

    fn filled_form(name: &str) -> GiftForm {
        GiftForm {
            name: name.to_string(),
            description: "Soft cotton".to_string(),
            image_url: "https://img.example/main.jpg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_gift_pads_slots() {
        let mut gift = Gift::new(
            filled_form("Blanket").to_input().validate().unwrap(),
            1,
        );
        gift.image_urls = Some(vec!["https://img.example/2.jpg".to_string()]);
        let form = GiftForm::from_gift(&gift);
        assert_eq!(form.image_urls[0], "https://img.example/2.jpg");
        assert!(form.image_urls[1..].iter().all(String::is_empty));
        assert!(form.purchase_links.iter().all(String::is_empty));
    }

    #[tokio::test]
    async fn test_submit_create_resets_form() {
        let service = service();
        let mut panel = AdminPanel::new();
        panel.form = filled_form("Blanket");

        let gift = panel.submit(&service).await.unwrap();
        assert_eq!(gift.name, "Blanket");
        assert_eq!(panel.form, GiftForm::default());
        assert!(matches!(panel.notice(), Some(Notice::Success(_))));
        assert!(!panel.is_saving());
    }

    #[tokio::test]
    async fn test_submit_with_missing_description_writes_nothing() {
        let service = service();
        let mut panel = AdminPanel::new();
        panel.form = filled_form("Blanket");
        panel.form.description.clear();

        assert!(panel.submit(&service).await.is_err());
        assert!(service.list_gifts().await.unwrap().is_empty());
        assert_eq!(panel.form.name, "Blanket");
    }

    #[tokio::test]
    async fn test_submit_edit_clears_target() {
        let service = service();
        let gift = service
            .create_gift(filled_form("Blanket").to_input())
            .await
            .unwrap();

        let mut panel = AdminPanel::new();
        panel.edit(&gift);
        assert_eq!(panel.editing(), Some(gift.id.as_str()));
        panel.form.name = "Wool blanket".to_string();

        let updated = panel.submit(&service).await.unwrap();
        assert_eq!(updated.id, gift.id);
        assert_eq!(updated.name, "Wool blanket");
        assert_eq!(panel.editing(), None);
        assert_eq!(panel.form, GiftForm::default());
    }

    #[tokio::test]
    async fn test_deleting_edit_target_resets_form() {
        let service = service();
        let gift = service
            .create_gift(filled_form("Blanket").to_input())
            .await
            .unwrap();

        let mut panel = AdminPanel::new();
        panel.edit(&gift);
        panel.request_delete(&gift.id);
        assert_eq!(panel.pending_delete(), Some(gift.id.as_str()));

        panel.confirm_delete(&service).await.unwrap();
        assert_eq!(panel.editing(), None);
        assert_eq!(panel.form, GiftForm::default());
        assert!(service.list_gifts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_other_gift_keeps_edit_form() {
        let service = service();
        let a = service.create_gift(filled_form("A").to_input()).await.unwrap();
        let b = service.create_gift(filled_form("B").to_input()).await.unwrap();

        let mut panel = AdminPanel::new();
        panel.edit(&a);
        panel.request_delete(&b.id);
        panel.confirm_delete(&service).await.unwrap();
        assert_eq!(panel.editing(), Some(a.id.as_str()));
        assert_eq!(panel.form.name, "A");
    }

    #[tokio::test]
    async fn test_cancelled_delete_removes_nothing() {
        let service = service();
        let gift = service
            .create_gift(filled_form("Blanket").to_input())
            .await
            .unwrap();

        let mut panel = AdminPanel::new();
        panel.request_delete(&gift.id);
        panel.cancel_delete();
        assert!(panel.confirm_delete(&service).await.is_err());
        assert_eq!(service.list_gifts().await.unwrap().len(), 1);
    }
}
