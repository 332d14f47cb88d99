use super::backend::SessionCommands;
use crate::error::AppResult;

/// Admin login state for one browser tab. The token lives only in memory,
/// so a new tab or a restart asks for the password again.
#[derive(Debug, Default)]
pub struct SessionGate {
    token: Option<String>,
    error: Option<String>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer token for admin requests.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A failed attempt leaves the gate as it was, apart from the error text.
    pub fn submit(&mut self, backend: &dyn SessionCommands, password: &str) -> AppResult<()> {
        self.error = None;
        match backend.open_session(password) {
            Ok(session) => {
                self.token = Some(session.access_token);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.error = None;
    }
}
