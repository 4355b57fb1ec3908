//! Request extractors that answer malformed input with 422.
//!
//! axum's own `Json` and `Query` reject with 400/415 and a plain-text body.
//! These wrappers keep their parsing but render every rejection as a
//! validation error.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::Response,
};
use serde::de::DeserializeOwned;

use crate::response::validation_error;

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| validation_error(rejection.body_text()))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| validation_error(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Deserialize)]
    struct Params {
        page: u32,
    }

    async fn echo(
        ValidQuery(params): ValidQuery<Params>,
        ValidJson(payload): ValidJson<Payload>,
    ) -> String {
        format!("{}:{}", payload.name, params.page)
    }

    fn app() -> Router {
        Router::new().route("/echo", post(echo))
    }

    async fn send(uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_valid_request_passes_through() {
        let (status, body) =
            send("/echo?page=2", Some("application/json"), r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"x:2");
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        let (status, body) = send("/echo?page=2", Some("application/json"), "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status_code"], 10422);
        assert!(json["message"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_422() {
        let (status, _) = send("/echo?page=2", None, r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bad_query_is_422() {
        let (status, _) =
            send("/echo?page=abc", Some("application/json"), r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
