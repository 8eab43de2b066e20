// User store and users service

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::UserStoreError;
pub use models::{NewUser, User};
pub use repository::{PgUserRepository, UserRepository};
pub use service::UsersService;
