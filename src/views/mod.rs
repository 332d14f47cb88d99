//! Client-side view state for the public list and the admin panel.
//!
//! These types hold no I/O of their own: writes go through the
//! [`GiftCommands`] / [`SessionCommands`] seams and fresh data arrives as
//! snapshots from a gift subscription.

pub mod admin_panel;
pub mod backend;
pub mod carousel;
pub mod listing;
pub mod session_gate;

pub use admin_panel::{AdminPanel, GiftForm};
pub use backend::{GiftCommands, SessionCommands};
pub use carousel::{
    CarouselBoard, CarouselState, SWIPE_THRESHOLD, SwipeOutcome, TRANSITION_DURATION,
};
pub use listing::ListingView;
pub use session_gate::SessionGate;

/// Feedback shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}
