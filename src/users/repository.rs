// Database repository for user records

use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::{
    error::UserStoreError,
    models::{NewUser, User},
};

/// Persistence abstraction over the `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user and return the stored row
    async fn create(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    /// Delete a user by id
    async fn delete(&self, id: i32) -> Result<(), UserStoreError>;
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, is_active, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, is_active, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), UserStoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-memory repository used by service and handler tests
#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
        next_id: AtomicUsize,
        delete_calls: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent `create` fail with a database error
        pub fn fail_writes(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }

        pub fn set_active(&self, username: &str, is_active: bool) {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.username == username) {
                user.is_active = is_active;
            }
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn delete_calls(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.username == username).cloned())
        }

        async fn create(&self, new_user: NewUser) -> Result<User, UserStoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(UserStoreError::Database(sqlx::Error::PoolTimedOut));
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
            let user = User {
                id,
                username: new_user.username,
                password_hash: new_user.password_hash,
                is_active: true,
                created_at: Utc::now(),
            };
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn delete(&self, id: i32) -> Result<(), UserStoreError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }
}
