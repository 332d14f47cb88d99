//! Public gift list: the latest snapshot, the claim form and the carousels.

use super::Notice;
use super::backend::GiftCommands;
use super::carousel::{CarouselBoard, CarouselState, SwipeOutcome};
use crate::error::{AppError, AppResult};
use crate::models::{Gift, claim_list};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

#[derive(Debug, Default)]
pub struct ListingView {
    gifts: Vec<Gift>,
    loaded: bool,
    carousels: CarouselBoard,
    claiming: Option<String>,
    guest_name: String,
    // image URLs that failed to load; hidden instead of reported
    broken_images: HashSet<String>,
    notice: Option<Notice>,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// False until the first snapshot arrives.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn gift(&self, gift_id: &str) -> AppResult<&Gift> {
        self.gifts
            .iter()
            .find(|g| g.id == gift_id)
            .ok_or_else(|| AppError::NotFound(format!("Gift {gift_id} not found")))
    }

    /// Replaces the list with a fresh snapshot from the subscription.
    pub fn apply_snapshot(&mut self, gifts: Vec<Gift>) {
        let image_counts: HashMap<String, usize> = gifts
            .iter()
            .map(|g| (g.id.clone(), g.all_images().len()))
            .collect();
        self.carousels.retain_gifts(&image_counts);

        if let Some(id) = &self.claiming
            && !image_counts.contains_key(id)
        {
            self.cancel_claim();
        }

        self.gifts = gifts;
        self.loaded = true;
    }

    // --- claiming ---

    /// Shared gifts stay open; others only while nobody has claimed them.
    pub fn is_claimable(gift: &Gift) -> bool {
        gift.is_shared || !gift.is_claimed()
    }

    pub fn claiming(&self) -> Option<&str> {
        self.claiming.as_deref()
    }

    pub fn open_claim(&mut self, gift_id: &str) -> bool {
        match self.gift(gift_id) {
            Ok(gift) if Self::is_claimable(gift) => {
                self.claiming = Some(gift_id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn set_guest_name(&mut self, name: &str) {
        self.guest_name = name.to_string();
    }

    pub fn cancel_claim(&mut self) {
        self.claiming = None;
        self.guest_name.clear();
    }

    /// Sends the claim for the open gift. Blank and repeated names are
    /// rejected against the snapshot before anything is sent.
    pub async fn confirm_claim(&mut self, backend: &dyn GiftCommands) -> AppResult<Gift> {
        let gift_id = self
            .claiming
            .clone()
            .ok_or_else(|| AppError::ValidationError("No gift selected".to_string()))?;

        let gift = self.gift(&gift_id)?;
        if let Err(e) = claim_list(gift.is_shared, &gift.claimed_by, &self.guest_name) {
            self.notice = Some(Notice::Error(e.to_string()));
            return Err(e);
        }

        let guest_name = self.guest_name.trim().to_string();
        // the form closes before the write completes
        self.cancel_claim();

        match backend.claim_gift(&gift_id, &guest_name).await {
            Ok(gift) => {
                self.notice = Some(Notice::Success("Gift claimed successfully".to_string()));
                Ok(gift)
            }
            Err(e) => {
                log::error!("Error claiming gift {gift_id}: {e}");
                let message = match &e {
                    AppError::ValidationError(msg) => msg.clone(),
                    _ => "Could not claim the gift. Please try again.".to_string(),
                };
                self.notice = Some(Notice::Error(message));
                Err(e)
            }
        }
    }

    // --- images ---

    pub fn mark_image_broken(&mut self, url: &str) {
        self.broken_images.insert(url.to_string());
    }

    pub fn is_image_hidden(&self, url: &str) -> bool {
        self.broken_images.contains(url)
    }

    pub fn carousel(&self, gift_id: &str) -> CarouselState {
        self.carousels.get(gift_id)
    }

    /// URL shown for a gift right now.
    pub fn current_image(&self, gift_id: &str) -> Option<String> {
        let gift = self.gift(gift_id).ok()?;
        gift.all_images()
            .get(self.carousels.get(gift_id).index())
            .cloned()
    }

    fn image_count(&self, gift_id: &str) -> Option<usize> {
        self.gift(gift_id).ok().map(|g| g.all_images().len())
    }

    pub fn next_image(&mut self, gift_id: &str, now: Instant) {
        if let Some(count) = self.image_count(gift_id) {
            self.carousels.state_mut(gift_id).next(count, now);
        }
    }

    pub fn previous_image(&mut self, gift_id: &str, now: Instant) {
        if let Some(count) = self.image_count(gift_id) {
            self.carousels.state_mut(gift_id).previous(count, now);
        }
    }

    pub fn touch_start(&mut self, gift_id: &str, x: f64) {
        self.carousels.state_mut(gift_id).touch_start(x);
    }

    pub fn touch_move(&mut self, gift_id: &str, x: f64) {
        self.carousels.state_mut(gift_id).touch_move(x);
    }

    /// Gestures on a gift that is no longer listed always snap back.
    pub fn touch_end(&mut self, gift_id: &str, now: Instant) -> SwipeOutcome {
        match self.image_count(gift_id) {
            Some(count) => self.carousels.state_mut(gift_id).touch_end(count, now),
            None => {
                self.carousels.state_mut(gift_id).touch_end(0, now);
                SwipeOutcome::SnapBack
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{GiftStore, MemoryGiftStore};
    use crate::models::GiftInput;
    use crate::services::{GiftService, SubscriptionService};
    use std::sync::Arc;

    fn service() -> GiftService {
        let store: Arc<dyn GiftStore> = Arc::new(MemoryGiftStore::new());
        GiftService::new(store.clone(), SubscriptionService::new(store, 8))
    }

    fn input(name: &str, shared: bool, extra_images: usize) -> GiftInput {
        GiftInput {
            name: name.to_string(),
            description: "desc".to_string(),
            image_url: "https://img.example/0.jpg".to_string(),
            image_urls: (1..=extra_images)
                .map(|i| format!("https://img.example/{i}.jpg"))
                .collect(),
            is_shared: shared,
            ..Default::default()
        }
    }

    async fn loaded_view(service: &GiftService) -> ListingView {
        let mut view = ListingView::new();
        view.apply_snapshot(service.list_gifts().await.unwrap());
        view
    }

    #[tokio::test]
    async fn test_claim_flow_updates_after_snapshot() {
        let service = service();
        let gift = service.create_gift(input("Crib", false, 0)).await.unwrap();
        let mut view = loaded_view(&service).await;

        assert!(view.open_claim(&gift.id));
        view.set_guest_name("  Ana ");
        let claimed = view.confirm_claim(&service).await.unwrap();
        assert_eq!(claimed.claimed_by, vec!["Ana".to_string()]);
        assert_eq!(view.claiming(), None);

        view.apply_snapshot(service.list_gifts().await.unwrap());
        assert!(!view.open_claim(&gift.id));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_write() {
        let service = service();
        let gift = service.create_gift(input("Diapers", true, 0)).await.unwrap();
        GiftService::claim_gift(
            &service,
            &gift.id,
            crate::models::ClaimGiftRequest {
                guest_name: "A".to_string(),
            },
        )
        .await
        .unwrap();
        let mut view = loaded_view(&service).await;

        assert!(view.open_claim(&gift.id));
        view.set_guest_name("A");
        assert!(matches!(
            view.confirm_claim(&service).await,
            Err(AppError::ValidationError(_))
        ));
        // form stays open so the guest can fix the name
        assert_eq!(view.claiming(), Some(gift.id.as_str()));
        assert!(matches!(view.notice(), Some(Notice::Error(_))));
        assert_eq!(service.get_gift(&gift.id).await.unwrap().claimed_by.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let service = service();
        let gift = service.create_gift(input("Crib", false, 0)).await.unwrap();
        let mut view = loaded_view(&service).await;
        view.open_claim(&gift.id);
        view.set_guest_name("   ");
        assert!(view.confirm_claim(&service).await.is_err());
        assert!(!service.get_gift(&gift.id).await.unwrap().is_claimed());
    }

    #[tokio::test]
    async fn test_carousel_follows_gift_images() {
        let service = service();
        let gift = service.create_gift(input("Stroller", false, 2)).await.unwrap();
        let mut view = loaded_view(&service).await;
        let now = Instant::now();

        view.previous_image(&gift.id, now);
        assert_eq!(view.carousel(&gift.id).index(), 2);
        assert_eq!(
            view.current_image(&gift.id).as_deref(),
            Some("https://img.example/2.jpg")
        );

        view.touch_start(&gift.id, 300.0);
        view.touch_move(&gift.id, 240.0);
        assert_eq!(view.touch_end(&gift.id, now), SwipeOutcome::Next);
        assert_eq!(view.carousel(&gift.id).index(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_clamps_and_prunes_carousels() {
        let service = service();
        let gift = service.create_gift(input("Stroller", false, 3)).await.unwrap();
        let mut view = loaded_view(&service).await;
        view.previous_image(&gift.id, Instant::now());
        assert_eq!(view.carousel(&gift.id).index(), 3);

        service
            .update_gift(&gift.id, input("Stroller", false, 0))
            .await
            .unwrap();
        view.apply_snapshot(service.list_gifts().await.unwrap());
        assert_eq!(view.carousel(&gift.id).index(), 0);

        view.open_claim(&gift.id);
        service.delete_gift(&gift.id).await.unwrap();
        view.apply_snapshot(service.list_gifts().await.unwrap());
        assert!(view.gifts().is_empty());
        assert_eq!(view.claiming(), None);
    }

    #[test]
    fn test_swipe_on_unlisted_gift_snaps_back() {
        let mut view = ListingView::new();
        view.apply_snapshot(Vec::new());
        let now = Instant::now();

        view.touch_start("gone", 300.0);
        view.touch_move("gone", 100.0);
        assert_eq!(view.touch_end("gone", now), SwipeOutcome::SnapBack);

        view.touch_start("gone", 100.0);
        view.touch_move("gone", 300.0);
        assert_eq!(view.touch_end("gone", now), SwipeOutcome::SnapBack);
        assert_eq!(view.carousel("gone").index(), 0);
    }

    #[test]
    fn test_broken_images_are_hidden() {
        let mut view = ListingView::new();
        assert!(!view.is_loaded());
        view.mark_image_broken("https://img.example/gone.jpg");
        assert!(view.is_image_hidden("https://img.example/gone.jpg"));
        assert!(!view.is_image_hidden("https://img.example/ok.jpg"));
    }
}
