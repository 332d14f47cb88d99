pub mod auth;
pub mod cors;

pub use auth::AdminSessionMiddleware;
pub use cors::create_cors;
