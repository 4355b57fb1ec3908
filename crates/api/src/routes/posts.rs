//! Post routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    extractors::{ValidJson, ValidQuery},
    middleware::MaybeCaller,
    response::{error_response, post_error, validation_error},
};
use postagram_core::post::{DeleteOutcome, ImageCleanup, NewPost, PostId};
use postagram_shared::AppError;

/// Creates the post routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/{post_id}", delete(delete_post))
}

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// Only list posts of this user.
    pub user: Option<String>,
}

/// POST `/posts` - Create a text post owned by the caller.
async fn create_post(
    State(state): State<AppState>,
    caller: MaybeCaller,
    ValidJson(payload): ValidJson<NewPost>,
) -> impl IntoResponse {
    let owner = caller.or_anonymous();
    match state.posts.create(&owner, payload).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => {
            error!(error = %e, user = %owner, "Failed to create post");
            error_response(&post_error(&e))
        }
    }
}

/// GET `/posts` - List posts, optionally of one user, with signed image links.
async fn list_posts(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListPostsQuery>,
) -> impl IntoResponse {
    match state.posts.list(query.user.as_deref()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list posts");
            error_response(&post_error(&e))
        }
    }
}

/// DELETE `/posts/{post_id}` - Delete one of the caller's posts and its image.
async fn delete_post(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(post_id): Path<String>,
) -> impl IntoResponse {
    let owner = caller.or_anonymous();
    let Some(post_id) = PostId::new(post_id) else {
        return validation_error("postId must not be empty");
    };

    match state.posts.delete(&owner, &post_id).await {
        Ok(DeleteOutcome::Deleted(report)) => {
            info!(
                post_id = %post_id,
                user = %owner,
                image_cleanup = report.image_cleanup.as_str(),
                "Post deleted"
            );

            let mut body = json!({
                "deleted": report.key,
                "image_cleanup": report.image_cleanup.as_str(),
            });
            if let ImageCleanup::Failed { reason } = &report.image_cleanup {
                body["image_cleanup_error"] = json!(reason);
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(DeleteOutcome::NotFound) => {
            error_response(&AppError::NotFound("Post not found".to_string()))
        }
        Err(e) => {
            error!(error = %e, post_id = %post_id, user = %owner, "Failed to delete post");
            error_response(&post_error(&e))
        }
    }
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
