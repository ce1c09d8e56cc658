//! Blog post service
//!
//! CRUD over blog posts with owner-only enforcement on mutations.
//! Reads are public.

use crate::auth::ensure_author;
use crate::error::ApiError;
use crate::repositories::{blog::BlogPostRecord, BlogRepository};
use dailyblog_shared::types::BlogListQuery;
use dailyblog_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// Blog post service
pub struct BlogService;

impl BlogService {
    /// Create a blog post authored by the given user
    ///
    /// The author's id and display name are snapshotted into the post
    /// as plain strings at creation time.
    pub async fn create(
        pool: &PgPool,
        author_id: Uuid,
        author_name: &str,
        title: &str,
        content: &str,
    ) -> Result<BlogPostRecord, ApiError> {
        validation::validate_title(title).map_err(ApiError::Validation)?;

        BlogRepository::insert(pool, title, content, &author_id.to_string(), author_name)
            .await
            .map_err(ApiError::Internal)
    }

    /// List blog posts (public)
    pub async fn list(pool: &PgPool, query: &BlogListQuery) -> Result<Vec<BlogPostRecord>, ApiError> {
        BlogRepository::list(
            pool,
            query.effective_limit(),
            query.order_by.as_deref().unwrap_or("created_at"),
            query.descending(),
        )
        .await
        .map_err(ApiError::Internal)
    }

    /// Fetch a single blog post (public)
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<BlogPostRecord, ApiError> {
        BlogRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Blog post with id {id} not found")))
    }

    /// Update a blog post (owner only)
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<BlogPostRecord, ApiError> {
        let existing = Self::get(pool, id).await?;
        ensure_author(&existing.author_id, user_id)?;

        validation::validate_title(title).map_err(ApiError::Validation)?;

        BlogRepository::update(pool, id, title, content)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Blog post with id {id} not found")))
    }

    /// Delete a blog post (owner only)
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let existing = Self::get(pool, id).await?;
        ensure_author(&existing.author_id, user_id)?;

        let deleted = BlogRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Blog post with id {id} not found"
            )));
        }

        Ok(())
    }
}
