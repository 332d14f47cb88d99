use crate::config::AdminSecret;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{JwtService, verify_admin_password};

/// Server-side check of the shared admin password.
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    secret: AdminSecret,
}

impl AuthService {
    pub fn new(jwt_service: JwtService, secret: AdminSecret) -> Self {
        Self {
            jwt_service,
            secret,
        }
    }

    pub fn login(&self, request: AdminLoginRequest) -> AppResult<AdminSessionResponse> {
        if request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter the password".to_string(),
            ));
        }

        if !verify_admin_password(&request.password, &self.secret)? {
            return Err(AppError::AuthError("Incorrect password".to_string()));
        }

        log::info!("Admin session opened");
        Ok(AdminSessionResponse {
            access_token: self.jwt_service.generate_session_token()?,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.session_expires_in(),
        })
    }
}
