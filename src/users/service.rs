// Users service - thin layer over the user repository

use std::sync::Arc;

use crate::users::{
    error::UserStoreError,
    models::{NewUser, User},
    repository::UserRepository,
};

/// Service for user lookup, creation and removal
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Create a new UsersService
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Find a user by username. A missing user is `Ok(None)`, not an error.
    pub async fn find_one(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        self.repository.find_by_username(username).await
    }

    /// Persist a new user and return the stored record, including its id
    pub async fn save(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let user = self.repository.create(new_user).await?;
        tracing::debug!("Saved user {} with id {}", user.username, user.id);
        Ok(user)
    }

    /// Remove a user by username; removing an unknown user is a no-op
    pub async fn remove(&self, username: &str) -> Result<(), UserStoreError> {
        match self.find_one(username).await? {
            Some(user) => {
                self.repository.delete(user.id).await?;
                tracing::info!("Removed user {} (id {})", user.username, user.id);
            }
            None => tracing::debug!("Remove requested for unknown user {}", username),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repository::mock::InMemoryUserRepository;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hashed".to_string(),
        }
    }

    fn service() -> (UsersService, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        (UsersService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn find_one_returns_existing_user() {
        let (service, _repo) = service();
        service.save(new_user("testuser")).await.unwrap();

        let user = service.find_one("testuser").await.unwrap();
        assert_eq!(user.map(|u| u.username), Some("testuser".to_string()));
    }

    #[tokio::test]
    async fn find_one_returns_none_when_missing() {
        let (service, _repo) = service();
        assert!(service.find_one("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_returns_persisted_user_with_id() {
        let (service, _repo) = service();
        let user = service.save(new_user("testuser")).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.username, "testuser");
        assert_eq!(user.password_hash, "hashed");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn remove_deletes_existing_user() {
        let (service, repo) = service();
        service.save(new_user("testuser")).await.unwrap();

        service.remove("testuser").await.unwrap();

        assert_eq!(repo.delete_calls(), 1);
        assert!(service.find_one("testuser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_unknown_user_does_not_call_delete() {
        let (service, repo) = service();

        service.remove("testuser").await.unwrap();

        assert_eq!(repo.delete_calls(), 0);
    }
}
