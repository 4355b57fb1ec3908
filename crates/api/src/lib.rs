//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The Post API router
//! - The object-created event intake router
//! - Caller identity resolution
//! - Request extractors and error responses

pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;
use postagram_core::events::LabelAttachmentHandler;
use postagram_core::post::PostService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::IdentityResolver;

/// Post API state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post operations.
    pub posts: Arc<PostService>,
    /// Resolves the caller identity from request headers.
    pub identity: Arc<dyn IdentityResolver>,
}

/// Event intake state.
#[derive(Clone)]
pub struct EventState {
    /// Label attachment handler.
    pub handler: Arc<LabelAttachmentHandler>,
}

/// Creates the Post API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Creates the router receiving object-created notifications.
pub fn create_event_router(state: EventState) -> Router {
    Router::new()
        .merge(routes::event_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
