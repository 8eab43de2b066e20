// Authentication module
// Provides password-based login issuing JWT access tokens, and user registration

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, ErrorKind};
pub use handlers::{login_handler, profile_handler, register_handler};
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse};
pub use password::{Argon2PasswordService, PasswordService};
pub use service::AuthService;
pub use token::{Claims, TokenService};
