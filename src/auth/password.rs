// Password hashing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;

use crate::auth::error::AuthError;
use crate::config::{ConfigError, PasswordConfig};

/// One-way password hashing used by registration and login
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password with a fresh salt
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    /// A malformed stored hash never matches.
    async fn verify_password(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id password service with a fixed work factor
#[derive(Debug, Clone)]
pub struct Argon2PasswordService {
    params: Params,
}

impl Argon2PasswordService {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn from_config(config: &PasswordConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.params()?))
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl PasswordService for Argon2PasswordService {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.hasher();
        let password = password.to_owned();

        // Argon2 is CPU-bound; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let argon2 = self.hasher();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || match PasswordHash::new(&hash) {
            Ok(parsed) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal work factor so tests stay fast
    fn fast_service() -> Argon2PasswordService {
        Argon2PasswordService::new(Params::new(8, 1, 1, None).unwrap())
    }

    #[tokio::test]
    async fn hash_then_verify_matches() {
        let service = fast_service();
        let hash = service.hash_password("correct").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("correct", &hash).await);
        assert!(!service.verify_password("wrong", &hash).await);
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let service = fast_service();
        let first = service.hash_password("same").await.unwrap();
        let second = service.hash_password("same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_never_verifies() {
        let service = fast_service();
        assert!(!service.verify_password("correct", "plaintext-not-a-hash").await);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            Argon2PasswordService::from_config(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
