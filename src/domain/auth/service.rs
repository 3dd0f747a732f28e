use super::{AuthServiceError, JwtManager, TokenResponse};
use std::sync::Arc;

/// Single-account login gate: the only valid credentials come from the
/// environment.
pub struct AuthService {
    username: String,
    password: String,
    jwt_manager: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(username: String, password: String, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            username,
            password,
            jwt_manager,
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AuthServiceError> {
        // Evaluate both so timing does not reveal which one was wrong
        let username_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());

        if !(username_ok && password_ok) {
            tracing::warn!(username = %username, "Login rejected");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.jwt_manager.generate_token(username)?;
        tracing::info!(username = %username, "Login succeeded");

        Ok(TokenResponse {
            token,
            expires_in: self.jwt_manager.expiration_secs(),
        })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
