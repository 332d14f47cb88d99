pub mod admin;
pub mod gift;

pub use admin::admin_config;
pub use gift::gift_config;
