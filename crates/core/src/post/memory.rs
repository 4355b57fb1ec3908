//! In-process record store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::keys::PostKey;
use super::store::{RecordStore, StoreError};
use super::types::PostRecord;

/// Record store backed by a process-local map.
///
/// Same semantics as the Postgres store; state is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<PostKey, PostRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.read().map_or(0, |records| records.len())
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<R>(
        &self,
        f: impl FnOnce(&BTreeMap<PostKey, PostRecord>) -> R,
    ) -> Result<R, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::operation("record map lock poisoned"))?;
        Ok(f(&records))
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<PostKey, PostRecord>) -> R,
    ) -> Result<R, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::operation("record map lock poisoned"))?;
        Ok(f(&mut records))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: PostRecord) -> Result<(), StoreError> {
        self.write(|records| {
            records.insert(record.key.clone(), record);
        })
    }

    async fn get(&self, key: &PostKey) -> Result<Option<PostRecord>, StoreError> {
        self.read(|records| records.get(key).cloned())
    }

    async fn query(&self, partition_key: &str) -> Result<Vec<PostRecord>, StoreError> {
        self.read(|records| {
            records
                .values()
                .filter(|r| r.key.partition_key == partition_key)
                .cloned()
                .collect()
        })
    }

    async fn scan(&self) -> Result<Vec<PostRecord>, StoreError> {
        self.read(|records| records.values().cloned().collect())
    }

    async fn delete(&self, key: &PostKey) -> Result<(), StoreError> {
        self.write(|records| {
            records.remove(key);
        })
    }

    async fn set_image_labels(
        &self,
        key: &PostKey,
        image: &str,
        labels: &[String],
    ) -> Result<(), StoreError> {
        self.write(|records| {
            records
                .entry(key.clone())
                .and_modify(|record| {
                    record.image = Some(image.to_string());
                    record.label = Some(labels.to_vec());
                })
                .or_insert_with(|| {
                    PostRecord::image_only(key.clone(), image.to_string(), labels.to_vec())
                });
        })
    }
}
