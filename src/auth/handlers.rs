// HTTP handlers for authentication endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse},
    service::AuthService,
};
use crate::error::ErrorResponse;

/// Login a user
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Bad credentials or inactive user", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(request) = payload?;
    tracing::debug!("Login request for {}", request.username);

    let response = service.login(&request.username, &request.password).await?;
    Ok(Json(response))
}

/// Register a new user
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 500, description = "Hashing or persistence failure", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(service): State<Arc<AuthService>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let Json(request) = payload?;
    tracing::debug!("Register request for {}", request.username);

    let response = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Identity of the caller, taken from the access token
/// GET /auth/profile
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Token claims", body = ProfileResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn profile_handler(user: AuthenticatedUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        id: user.id,
        username: user.username,
        is_active: user.is_active,
    })
}
