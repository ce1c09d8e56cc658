//! Identity resolution for protected routes
//!
//! The [`AuthUser`] extractor is the single gate every protected route
//! passes through: it verifies the bearer token and loads the full user
//! record behind its subject. Any failure short-circuits the request
//! with an authentication error before the handler body runs.

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::repositories::user::UserRecord;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated user resolved from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
}

impl AuthUser {
    /// Id of the resolved user
    #[inline]
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        // Pure cryptographic/structural check, no store access
        let subject = app_state.tokens().verify_subject(token)?;

        // A verified token whose subject no longer exists is an
        // authentication failure, not a server error.
        let user = UserRepository::find_by_id(app_state.db(), subject)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthUser { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_auth_user_exposes_id() {
        let user = UserRecord {
            id: Uuid::new_v4(),
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            api_key: "key".to_string(),
            created_at: Utc::now(),
        };
        let auth = AuthUser { user: user.clone() };
        assert_eq!(auth.id(), user.id);
    }
}
