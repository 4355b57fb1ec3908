use super::*;
use crate::testing::{FakeObjectStore, body_json, state_with, test_state};
use axum::{body::Body, http::Request, response::Response};
use postagram_core::post::{MemoryRecordStore, PostKey, PostRecord, RecordStore};
use tower::ServiceExt;

fn app(state: AppState) -> Router {
    Router::new().merge(routes()).with_state(state)
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    identity: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder.header("Authorization", identity);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

fn key(user: &str, post: &str) -> PostKey {
    PostKey {
        partition_key: format!("USER#{user}"),
        sort_key: format!("POST#{post}"),
    }
}

async fn seed_image_post(store: &MemoryRecordStore, user: &str, post: &str, image: &str) {
    store
        .put(PostRecord {
            image: Some(image.to_string()),
            label: Some(vec!["Cat".to_string()]),
            ..PostRecord::text(key(user, post), "t".to_string(), "b".to_string())
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_post_returns_receipt() {
    let (state, store, _) = test_state();

    let response = send(
        app(state),
        "POST",
        "/posts",
        Some("bob"),
        Some(json!({ "title": "hi", "body": "world" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"], "USER#bob");
    let post_id = json["post_id"].as_str().unwrap();
    assert_eq!(json["id"], format!("POST#{post_id}"));

    let stored = store.get(&key("bob", post_id)).await.unwrap().unwrap();
    assert_eq!(stored.title.as_deref(), Some("hi"));
    assert_eq!(stored.body.as_deref(), Some("world"));
}

#[tokio::test]
async fn test_create_post_without_identity_is_anonymous() {
    let (state, store, _) = test_state();

    let response = send(
        app(state),
        "POST",
        "/posts",
        None,
        Some(json!({ "title": "hi", "body": "world" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"], "USER#anonymous");

    let post_id = json["post_id"].as_str().unwrap();
    let stored = store
        .get(&key("anonymous", post_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.as_deref(), Some("hi"));
    assert_eq!(stored.body.as_deref(), Some("world"));
}

#[tokio::test]
async fn test_create_post_missing_body_field_is_422() {
    let (state, _, _) = test_state();

    let response = send(
        app(state),
        "POST",
        "/posts",
        Some("bob"),
        Some(json!({ "title": "hi" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["status_code"], 10422);
    assert!(json["data"].is_null());
    assert!(json["message"].as_str().unwrap().contains("body"));
}

#[tokio::test]
async fn test_list_posts_by_user_and_all() {
    let (state, store, _) = test_state();
    store
        .put(PostRecord::text(key("alice", "1"), "a".into(), "x".into()))
        .await
        .unwrap();
    store
        .put(PostRecord::text(key("bob", "2"), "b".into(), "y".into()))
        .await
        .unwrap();

    let response = send(app(state.clone()), "GET", "/posts?user=alice", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!([{ "user": "USER#alice", "id": "POST#1", "title": "a", "body": "x" }])
    );

    let response = send(app(state.clone()), "GET", "/posts", None, None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = send(app(state), "GET", "/posts?user=", None, None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_posts_signs_images() {
    let (state, store, _) = test_state();
    seed_image_post(&store, "bob", "7", "bob/7/cat.png").await;

    let response = send(app(state), "GET", "/posts?user=bob", None, None).await;
    let json = body_json(response).await;

    let image = json[0]["image"].as_str().unwrap();
    assert_ne!(image, "bob/7/cat.png");
    assert!(image.starts_with("https://signed.example/"));
    assert_eq!(json[0]["label"], json!(["Cat"]));
}

#[tokio::test]
async fn test_delete_missing_post_is_404() {
    let (state, _, _) = test_state();

    let response = send(app(state), "DELETE", "/posts/nope", Some("bob"), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Post not found" })
    );
}

#[tokio::test]
async fn test_delete_post_removes_record_and_image() {
    let (state, store, objects) = test_state();
    seed_image_post(&store, "bob", "7", "bob/7/cat.png").await;

    let response = send(app(state), "DELETE", "/posts/7", Some("bob"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["deleted"], json!({ "user": "USER#bob", "id": "POST#7" }));
    assert_eq!(json["image_cleanup"], "deleted");
    assert!(store.is_empty());
    assert_eq!(*objects.deleted.lock().unwrap(), vec!["bob/7/cat.png"]);
}

#[tokio::test]
async fn test_delete_post_survives_image_failure() {
    let (state, store, _) = state_with(FakeObjectStore {
        fail_delete: true,
        ..FakeObjectStore::default()
    });
    seed_image_post(&store, "bob", "7", "bob/7/cat.png").await;

    let response = send(app(state), "DELETE", "/posts/7", Some("bob"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["image_cleanup"], "failed");
    assert!(json["image_cleanup_error"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_delete_is_scoped_to_caller() {
    let (state, store, _) = test_state();
    store
        .put(PostRecord::text(key("alice", "1"), "a".into(), "x".into()))
        .await
        .unwrap();

    let response = send(app(state), "DELETE", "/posts/1", Some("bob"), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_delete_without_identity_is_not_found() {
    let (state, store, _) = test_state();
    store
        .put(PostRecord::text(key("bob", "1"), "b".into(), "y".into()))
        .await
        .unwrap();

    let response = send(app(state), "DELETE", "/posts/1", None, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Post not found" })
    );
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_delete_without_identity_removes_anonymous_post() {
    let (state, store, _) = test_state();
    store
        .put(PostRecord::text(key("anonymous", "1"), "a".into(), "x".into()))
        .await
        .unwrap();

    let response = send(app(state), "DELETE", "/posts/1", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["deleted"],
        json!({ "user": "USER#anonymous", "id": "POST#1" })
    );
    assert!(store.is_empty());
}
