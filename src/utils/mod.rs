pub mod jwt;
pub mod password;
pub mod url;

pub use jwt::*;
pub use password::*;
pub use url::{MAX_SECONDARY_LINKS, compact_links, validate_http_url};
