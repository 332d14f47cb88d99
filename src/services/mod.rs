pub mod auth_service;
pub mod gift_service;
pub mod subscription_service;

pub use auth_service::*;
pub use gift_service::*;
pub use subscription_service::*;
