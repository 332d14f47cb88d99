use bcrypt::verify;
use crate::config::AdminSecret;
use crate::error::{AppError, AppResult};

/// Checks a submitted admin password against the configured secret.
pub fn verify_admin_password(password: &str, secret: &AdminSecret) -> AppResult<bool> {
    match secret {
        AdminSecret::Plain(expected) => Ok(password == expected),
        AdminSecret::Bcrypt(hash) => verify(password, hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}"))),
    }
}
