pub mod gifts;

pub use gifts as gift_entity;
pub use gifts::StringList;
