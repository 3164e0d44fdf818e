//! Admin authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::AdminClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Authenticate the site owner and return a JWT token with its claims
    pub fn login(&self, email: &str, password: &str) -> AppResult<(String, AdminClaims)> {
        let invalid = || AppError::Authentication("Invalid email or password".to_string());

        if !email.trim().eq_ignore_ascii_case(self.config.admin_email.trim()) {
            return Err(invalid());
        }

        let Some(hash) = self.config.admin_password_hash.as_deref() else {
            tracing::warn!("Admin login attempted but no password hash is configured");
            return Err(invalid());
        };

        if !Self::verify_password(hash, password)? {
            tracing::warn!(email = %email, "Failed admin login");
            return Err(invalid());
        }

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "admin".to_string(),
            email: self.config.admin_email.clone(),
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(email = %claims.email, "Admin logged in");
        Ok((token, claims))
    }

    /// Decode and check a bearer token
    pub fn verify_token(&self, token: &str) -> AppResult<AdminClaims> {
        AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
    }

    fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
            admin_email: "owner@homestay.test".to_string(),
            admin_password_hash: Some(AuthService::hash_password("correct horse").unwrap()),
        })
    }

    #[test]
    fn login_issues_verifiable_token() {
        let auth = service();
        let (token, claims) = auth.login("Owner@Homestay.test", "correct horse").unwrap();
        assert_eq!(claims.email, "owner@homestay.test");
        assert_eq!(auth.verify_token(&token).unwrap(), claims);
    }

    #[test]
    fn wrong_credentials_are_rejected() {
        let auth = service();
        assert!(matches!(
            auth.login("owner@homestay.test", "wrong"),
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            auth.login("guest@homestay.test", "correct horse"),
            Err(AppError::Authentication(_))
        ));
        assert!(auth.verify_token("not-a-token").is_err());
    }

    #[test]
    fn login_fails_without_configured_hash() {
        let auth = AuthService::new(AuthConfig {
            admin_email: "owner@homestay.test".to_string(),
            admin_password_hash: None,
            ..AuthConfig::default()
        });
        assert!(auth.login("owner@homestay.test", "").is_err());
    }
}
