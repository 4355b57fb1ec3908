//! API route definitions.

use axum::Router;

use crate::{AppState, EventState};

pub mod events;
pub mod health;
pub mod posts;
pub mod uploads;

/// Creates the Post API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(posts::routes())
        .merge(uploads::routes())
}

/// Creates the event intake routes.
pub fn event_routes() -> Router<EventState> {
    Router::new()
        .merge(health::routes())
        .merge(events::routes())
}
