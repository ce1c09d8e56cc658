//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public view of a user record
///
/// The password hash and API key are never part of this type, so they
/// cannot leak through a handler response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Bearer token response returned by login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Password reset request (phase 1: mail a reset link)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Password reset confirmation body (phase 2: set the new password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPasswordRequest {
    pub new_password: String,
}

/// Generic message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Blog post creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogPostRequest {
    pub title: String,
    pub content: String,
}

/// Blog post update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBlogPostRequest {
    pub title: String,
    pub content: String,
}

/// Blog post response
///
/// `author_id` is the string snapshot taken at creation time, not a
/// live reference to the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing blog posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListQuery {
    pub limit: Option<i64>,
    pub order_by: Option<String>,
    pub order: Option<String>,
}

impl BlogListQuery {
    pub const DEFAULT_LIMIT: i64 = 5;
    pub const MAX_LIMIT: i64 = 100;

    /// Clamp the limit into the accepted range
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    /// Whether results should be returned in descending order (default)
    pub fn descending(&self) -> bool {
        !matches!(self.order.as_deref(), Some("asc"))
    }
}
