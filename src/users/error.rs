/// Errors raised by the user store
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
