//! Blog post API routes
//!
//! Reads are public; create/update/delete require authentication, and
//! update/delete additionally require ownership.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::blog::BlogPostRecord;
use crate::services::BlogService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dailyblog_shared::types::{
    BlogListQuery, BlogPostResponse, CreateBlogPostRequest, UpdateBlogPostRequest,
};
use uuid::Uuid;

/// Create blog routes
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_blog).get(list_blogs))
        .route("/:id", get(get_blog).put(update_blog).delete(delete_blog))
}

fn post_response(post: BlogPostRecord) -> BlogPostResponse {
    BlogPostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author_id: post.author_id,
        author_name: post.author_name,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /api/v1/blogs - Create a new blog post
async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBlogPostRequest>,
) -> ApiResult<(StatusCode, Json<BlogPostResponse>)> {
    let post = BlogService::create(
        state.db(),
        auth.id(),
        &auth.user.name,
        &req.title,
        &req.content,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(post_response(post))))
}

/// GET /api/v1/blogs - List blog posts
///
/// Public. Supports `limit` (default 5), `order_by` (created_at,
/// updated_at, or title) and `order` (asc|desc, default desc).
async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> ApiResult<Json<Vec<BlogPostResponse>>> {
    let posts = BlogService::list(state.db(), &query).await?;
    Ok(Json(posts.into_iter().map(post_response).collect()))
}

/// GET /api/v1/blogs/:id - Fetch a single blog post
///
/// Public.
async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BlogPostResponse>> {
    let post = BlogService::get(state.db(), id).await?;
    Ok(Json(post_response(post)))
}

/// PUT /api/v1/blogs/:id - Update a blog post (author only)
async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBlogPostRequest>,
) -> ApiResult<Json<BlogPostResponse>> {
    let post = BlogService::update(state.db(), id, auth.id(), &req.title, &req.content).await?;
    Ok(Json(post_response(post)))
}

/// DELETE /api/v1/blogs/:id - Delete a blog post (author only)
async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    BlogService::delete(state.db(), id, auth.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
