//! Registration and login routes
//!
//! # Performance
//!
//! - Token keys are pre-computed in AppState (no per-request allocation)
//! - Password hashing runs on the blocking thread pool

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use dailyblog_shared::types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::register(
        state.db(),
        state.mailer(),
        &req.name,
        &req.email,
        &req.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }),
    ))
}

/// Login with name and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let access_token =
        UserService::login(state.db(), state.tokens(), &req.name, &req.password).await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
