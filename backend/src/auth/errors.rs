//! Authentication error kinds
//!
//! The kinds stay distinct internally so operators can see from the
//! logs which check failed, but token-path failures all collapse into
//! one uniform 401 response so callers cannot probe which one it was.

use crate::error::ApiError;
use thiserror::Error;
use tracing::debug;

/// Message returned for every token-path authentication failure
pub const TOKEN_REJECTED: &str = "Token is invalid or expired";

/// Authentication failure kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed token, bad signature, or missing subject claim
    #[error("invalid token")]
    InvalidToken,

    /// Valid signature but the expiry has passed
    #[error("token expired")]
    Expired,

    /// Token verified but its subject no longer resolves to a user
    #[error("user not found for token subject")]
    UserNotFound,

    /// Password did not match the stored hash
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        debug!(kind = %err, "authentication failed");
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect password".to_string())
            }
            // InvalidToken, Expired, and UserNotFound are deliberately
            // indistinguishable to the caller.
            _ => ApiError::Unauthorized(TOKEN_REJECTED.to_string()),
        }
    }
}
