//! Blog post repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Blog post record from database
///
/// `author_id` is the string snapshot of the creator's user id taken at
/// insert time; it is compared as text for ownership checks and never
/// joined against the users table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogPostRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Columns the list endpoint may order by
const ORDER_COLUMNS: &[&str] = &["created_at", "updated_at", "title"];

/// Blog post repository for database operations
pub struct BlogRepository;

impl BlogRepository {
    /// Insert a new blog post
    pub async fn insert(
        pool: &PgPool,
        title: &str,
        content: &str,
        author_id: &str,
        author_name: &str,
    ) -> Result<BlogPostRecord> {
        let post = sqlx::query_as::<_, BlogPostRecord>(
            r#"
            INSERT INTO blog_posts (title, content, author_id, author_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_id, author_name, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(author_name)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Find a blog post by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<BlogPostRecord>> {
        let post = sqlx::query_as::<_, BlogPostRecord>(
            r#"
            SELECT id, title, content, author_id, author_name, created_at, updated_at
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// List blog posts
    ///
    /// `order_by` is matched against a whitelist; anything else falls
    /// back to `created_at`. The column name is interpolated only after
    /// that check.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        order_by: &str,
        descending: bool,
    ) -> Result<Vec<BlogPostRecord>> {
        let column = ORDER_COLUMNS
            .iter()
            .find(|&&c| c == order_by)
            .copied()
            .unwrap_or("created_at");
        let direction = if descending { "DESC" } else { "ASC" };

        let query = format!(
            r#"
            SELECT id, title, content, author_id, author_name, created_at, updated_at
            FROM blog_posts
            ORDER BY {column} {direction}
            LIMIT $1
            "#,
        );

        let posts = sqlx::query_as::<_, BlogPostRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// Update a blog post's title and content, stamping `updated_at`
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<BlogPostRecord>> {
        let post = sqlx::query_as::<_, BlogPostRecord>(
            r#"
            UPDATE blog_posts
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, author_id, author_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Delete a blog post
    ///
    /// Returns the number of affected rows; 0 means the post was absent.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/
}
