//! Object-created notification intake.
//!
//! The object store (or a relay in front of it) POSTs its notification
//! documents here. A non-2xx answer tells the sender to redeliver.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    EventState,
    extractors::ValidJson,
    response::{error_response, event_error},
};
use postagram_core::events::ObjectEventNotification;

/// Creates the event routes.
pub fn routes() -> Router<EventState> {
    Router::new().route("/events/object-created", post(object_created))
}

/// POST `/events/object-created` - Label every created object in the document.
async fn object_created(
    State(state): State<EventState>,
    ValidJson(notification): ValidJson<ObjectEventNotification>,
) -> impl IntoResponse {
    let events = notification.object_created();
    info!(count = events.len(), "Object-created notification received");

    match state.handler.handle_all(&events).await {
        Ok(attached) => (StatusCode::OK, Json(json!({ "attached": attached }))).into_response(),
        Err((index, e)) => {
            let key = events.get(index).map_or("", |event| event.key.as_str());
            error!(error = %e, key = %key, "Failed to attach labels");
            error_response(&event_error(&e))
        }
    }
}
