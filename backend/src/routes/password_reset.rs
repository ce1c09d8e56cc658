//! Password reset routes
//!
//! Two phases: POST mails a reset link containing a token, PUT consumes
//! the token (from the query string, where the mailed link put it) and
//! sets the new password.

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use dailyblog_shared::types::{MessageResponse, NewPasswordRequest, PasswordResetRequest};
use serde::Deserialize;

/// Create password reset routes
pub fn password_reset_routes() -> Router<AppState> {
    Router::new().route("/reset", post(request_reset).put(confirm_reset))
}

/// Token carried by the mailed reset link
#[derive(Debug, Deserialize)]
pub struct ResetTokenQuery {
    pub token: String,
}

/// Request a password reset email
///
/// POST /api/v1/password/reset
async fn request_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::request_password_reset(
        state.db(),
        state.tokens(),
        state.mailer(),
        &state.config().mail.reset_link_base,
        &req.email,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Password reset email sent".to_string(),
    }))
}

/// Confirm a password reset with the mailed token
///
/// PUT /api/v1/password/reset?token=...
async fn confirm_reset(
    State(state): State<AppState>,
    Query(query): Query<ResetTokenQuery>,
    Json(req): Json<NewPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::confirm_password_reset(
        state.db(),
        state.tokens(),
        &query.token,
        &req.new_password,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}
