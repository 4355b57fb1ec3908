//! Test doubles shared by the route tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use postagram_core::post::{MemoryRecordStore, PostService};
use postagram_core::storage::{ObjectStore, PresignedUrl, StorageError};

use crate::AppState;
use crate::middleware::HeaderIdentity;

/// Object store that signs deterministically and records deletes.
#[derive(Default)]
pub struct FakeObjectStore {
    pub fail_delete: bool,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn presign_read(&self, key: &str) -> Result<PresignedUrl, StorageError> {
        Ok(PresignedUrl {
            url: format!("https://signed.example/test-bucket/{key}?X-Amz-Expires=3600"),
            method: "GET".to_string(),
            expires_at: Utc::now(),
            headers: HashMap::new(),
        })
    }

    async fn presign_write(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        Ok(PresignedUrl {
            url: format!("https://signed.example/test-bucket/{key}?X-Amz-Expires=900"),
            method: "PUT".to_string(),
            expires_at: Utc::now(),
            headers,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_delete {
            return Err(StorageError::Delete {
                key: key.to_string(),
                reason: "access denied".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// State over an empty in-memory store and a well-behaved object store.
pub fn test_state() -> (AppState, Arc<MemoryRecordStore>, Arc<FakeObjectStore>) {
    state_with(FakeObjectStore::default())
}

/// State over an empty in-memory store and the given object store.
pub fn state_with(
    objects: FakeObjectStore,
) -> (AppState, Arc<MemoryRecordStore>, Arc<FakeObjectStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    let objects = Arc::new(objects);
    let state = AppState {
        posts: Arc::new(PostService::new(store.clone(), objects.clone())),
        identity: Arc::new(HeaderIdentity::default()),
    };
    (state, store, objects)
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
