//! User service for registration, login, and password reset
//!
//! # Performance
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - The token service is passed by reference (pre-computed keys)

use crate::auth::{generate_api_key, AuthError, PasswordService, TokenService};
use crate::error::ApiError;
use crate::mailer::Mailer;
use crate::repositories::{user::UserRecord, UserRepository};
use dailyblog_shared::validation;
use sqlx::PgPool;
use tracing::warn;
use validator::ValidateEmail;

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Name and email conflicts are reported separately. The welcome
    /// email is best-effort: once the record is persisted, a delivery
    /// failure is logged and the registration still succeeds.
    pub async fn register(
        pool: &PgPool,
        mailer: &Mailer,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validation::validate_username(name).map_err(ApiError::Validation)?;

        if UserRepository::name_exists(pool, name)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username is already taken".to_string()));
        }
        if UserRepository::email_exists(pool, email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email is already taken".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        // Reserved field: generated here, consumed by no endpoint yet
        let api_key = generate_api_key();

        let user = UserRepository::create(pool, name, email, &password_hash, &api_key)
            .await
            .map_err(ApiError::Internal)?;

        if let Err(e) = mailer.send_registration_email(&user.email, &user.name).await {
            warn!(error = %e, user = %user.id, "failed to send registration email");
        }

        Ok(user)
    }

    /// Login with name and password, issuing a bearer token
    ///
    /// An unknown name is `NotFound`, a wrong password
    /// `InvalidCredentials`; the two stay distinguishable for operator
    /// diagnostics.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        name: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let user = UserRepository::find_by_name(pool, name)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        tokens.issue(user.id).map_err(ApiError::Internal)
    }

    /// Request a password reset link for an email address (phase 1)
    ///
    /// Issues a regular token for the account and mails it embedded in
    /// a reset link. Delivery is best-effort and logged on failure.
    pub async fn request_password_reset(
        pool: &PgPool,
        tokens: &TokenService,
        mailer: &Mailer,
        reset_link_base: &str,
        email: &str,
    ) -> Result<(), ApiError> {
        let user = UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::NotFound("User with this email does not exist".to_string())
            })?;

        let token = tokens.issue(user.id).map_err(ApiError::Internal)?;
        let reset_link = format!("{}/?token={}", reset_link_base.trim_end_matches('/'), token);

        if let Err(e) = mailer
            .send_password_reset_email(&user.email, &user.name, &reset_link)
            .await
        {
            warn!(error = %e, user = %user.id, "failed to send password reset email");
        }

        Ok(())
    }

    /// Confirm a password reset with a previously issued token (phase 2)
    ///
    /// The token is not single-use: it stays replayable until expiry.
    /// An expired or malformed token leaves the password unchanged.
    pub async fn confirm_password_reset(
        pool: &PgPool,
        tokens: &TokenService,
        token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let subject = tokens.verify_subject(token)?;

        let password_hash = PasswordService::hash_async(new_password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let updated = UserRepository::update_password_hash(pool, subject, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if updated == 0 {
            return Err(ApiError::NotFound(format!(
                "Could not update password for user with id: {subject}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Flow tests require a database - see backend/tests/
}
