// Authentication service - business logic layer

use std::sync::Arc;

use tokio::sync::OnceCell;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginResponse, RegisterRequest, RegisterResponse},
    password::PasswordService,
    token::TokenService,
};
use crate::users::{NewUser, UsersService};

// Hashed once and checked on unknown-user logins
const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

/// Authentication service coordinating login and registration
pub struct AuthService {
    users: UsersService,
    password_service: Arc<dyn PasswordService>,
    token_service: Arc<TokenService>,
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        users: UsersService,
        password_service: Arc<dyn PasswordService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            password_service,
            token_service,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Login a user
    ///
    /// The password check runs before the active check, so an inactive
    /// account is only reported to a caller who knows the password.
    /// Unknown usernames still pay for one hash verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = match self.users.find_one(username).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown user {}", username);
                self.verify_against_dummy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .password_service
            .verify_password(password, &user.password_hash)
            .await
        {
            tracing::debug!("Wrong password for user {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::debug!("Login attempt for inactive user {}", username);
            return Err(AuthError::InactiveUser);
        }

        let access_token = self
            .token_service
            .sign(user.id, &user.username, user.is_active)?;

        tracing::info!("User {} logged in", user.username);
        Ok(LoginResponse { access_token })
    }

    async fn verify_against_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.password_service.hash_password(DUMMY_PASSWORD))
            .await;

        match dummy {
            Ok(hash) => {
                self.password_service.verify_password(password, hash).await;
            }
            Err(e) => tracing::warn!("Could not prepare placeholder password hash: {}", e),
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AuthError> {
        request.validate()?;

        let RegisterRequest { username, password } = request;

        // Not atomic with the insert below; the UNIQUE constraint on
        // users.username is what actually prevents duplicates under races.
        if self.users.find_one(&username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self.password_service.hash_password(&password).await?;

        let saved = self
            .users
            .save(NewUser {
                username,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {} with id {}", saved.username, saved.id);
        Ok(RegisterResponse {
            username: saved.username,
        })
    }
}
