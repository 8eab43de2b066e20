// JWT token generation and validation service

use crate::auth::error::AuthError;
use crate::config::JwtConfig;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl TokenService {
    /// Create a new TokenService from the signing configuration
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expires_in_secs: config.expires_in_secs,
        }
    }

    /// Sign an access token for the given identity
    pub fn sign(&self, id: i32, username: &str, is_active: bool) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id,
            username: username.to_string(),
            is_active,
            iat: now,
            exp: now + self.expires_in_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token generation error: {}", e)))
    }

    /// Validate an access token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Expired token presented"),
                    _ => tracing::debug!("Token rejected: {}", e),
                }
                AuthError::InvalidToken
            })
    }
}
