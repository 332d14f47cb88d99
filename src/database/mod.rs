pub mod connection;
pub mod memory_store;
pub mod postgres_store;
pub mod store;

pub use connection::*;
pub use memory_store::MemoryGiftStore;
pub use postgres_store::PostgresGiftStore;
pub use store::GiftStore;
