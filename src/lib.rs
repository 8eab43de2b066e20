pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    Argon2PasswordService, AuthService, LoginRequest, LoginResponse, ProfileResponse,
    RegisterRequest, RegisterResponse, TokenService,
};
use config::{Config, ConfigError};
use error::ErrorResponse;
use users::{PgUserRepository, UsersService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::register_handler,
        auth::handlers::profile_handler,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            RegisterResponse,
            ProfileResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and token introspection")
    ),
    info(
        title = "Auth API",
        version = "1.0.0",
        description = "User registration and JWT login backed by PostgreSQL"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the production services: PostgreSQL users, Argon2 passwords, HS256 tokens
    pub fn from_config(config: &Config, pool: db::DbPool) -> Result<Self, ConfigError> {
        let users = UsersService::new(Arc::new(PgUserRepository::new(pool)));
        let passwords = Arc::new(Argon2PasswordService::from_config(&config.password)?);
        let tokens = Arc::new(TokenService::new(&config.jwt));

        Ok(Self {
            auth: Arc::new(AuthService::new(users, passwords, tokens.clone())),
            tokens,
        })
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Routes under `/auth`
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login_handler))
        .route("/register", post(auth::register_handler))
        .route("/profile", get(auth::profile_handler))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and tracing middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        )
        .with_state(state)
}
