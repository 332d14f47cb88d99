pub mod auth;
pub mod common;
pub mod gift;

pub use auth::*;
pub use common::*;
pub use gift::*;
