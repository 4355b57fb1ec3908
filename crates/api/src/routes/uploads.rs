//! Direct upload routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::error;

use crate::{
    AppState,
    extractors::ValidQuery,
    middleware::MaybeCaller,
    response::{error_response, post_error, validation_error},
};
use postagram_core::post::{PostId, UploadRequest};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/signedUrlPut", get(signed_url_put))
}

/// Query parameters for an upload credential.
#[derive(Debug, Deserialize)]
pub struct SignedUrlPutQuery {
    /// Name the image will be stored under.
    pub filename: String,
    /// MIME type of the image.
    pub filetype: String,
    /// Post the image belongs to.
    #[serde(rename = "postId")]
    pub post_id: String,
}

/// GET `/signedUrlPut` - Issue a presigned PUT for `<caller>/<postId>/<filename>`.
async fn signed_url_put(
    State(state): State<AppState>,
    caller: MaybeCaller,
    ValidQuery(query): ValidQuery<SignedUrlPutQuery>,
) -> impl IntoResponse {
    let owner = caller.or_anonymous();
    let Some(post_id) = PostId::new(query.post_id) else {
        return validation_error("postId must not be empty");
    };
    if query.filename.is_empty() {
        return validation_error("filename must not be empty");
    }

    let request = UploadRequest {
        post_id,
        filename: query.filename,
        content_type: query.filetype,
    };

    match state.posts.request_upload(&owner, request).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket)).into_response(),
        Err(e) => {
            error!(error = %e, user = %owner, "Failed to issue upload URL");
            error_response(&post_error(&e))
        }
    }
}
