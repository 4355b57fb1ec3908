//! Post repository for database operations.
//!
//! Implements the record store on a single Postgres table whose name comes
//! from configuration. Every statement is parameterized; only the checked,
//! quoted table name is formatted into the SQL text.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value,
};
use tracing::debug;

use crate::schema::{TableNameError, quoted_table};
use postagram_core::post::{PostKey, PostRecord, RecordStore, StoreError};

const COLUMNS: &str = "partition_key, sort_key, title, body, image, label";

/// Raw row of the posts table.
#[derive(Debug, FromQueryResult)]
struct PostRow {
    partition_key: String,
    sort_key: String,
    title: Option<String>,
    body: Option<String>,
    image: Option<String>,
    label: Option<serde_json::Value>,
}

impl TryFrom<PostRow> for PostRecord {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let label = row
            .label
            .map(serde_json::from_value::<Vec<String>>)
            .transpose()
            .map_err(|e| {
                StoreError::malformed(format!(
                    "label of ({}, {}): {e}",
                    row.partition_key, row.sort_key
                ))
            })?;

        Ok(PostRecord {
            key: PostKey {
                partition_key: row.partition_key,
                sort_key: row.sort_key,
            },
            title: row.title,
            body: row.body,
            image: row.image,
            label,
        })
    }
}

/// Post repository implementation.
#[derive(Debug, Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
    table: String,
}

impl PostRepository {
    /// Create a repository over `table`.
    ///
    /// # Errors
    ///
    /// Returns `TableNameError` if `table` is not a plain identifier.
    pub fn new(db: DatabaseConnection, table: &str) -> Result<Self, TableNameError> {
        Ok(Self {
            db,
            table: quoted_table(table)?,
        })
    }

    fn statement(sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    async fn fetch(&self, stmt: Statement) -> Result<Vec<PostRecord>, StoreError> {
        PostRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(to_store_error)?
            .into_iter()
            .map(PostRecord::try_from)
            .collect()
    }

    async fn exec(&self, stmt: Statement) -> Result<u64, StoreError> {
        self.db
            .execute(stmt)
            .await
            .map(|result| result.rows_affected())
            .map_err(to_store_error)
    }
}

#[async_trait]
impl RecordStore for PostRepository {
    async fn put(&self, record: PostRecord) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (partition_key, sort_key) DO UPDATE SET \
             title = EXCLUDED.title, body = EXCLUDED.body, \
             image = EXCLUDED.image, label = EXCLUDED.label",
            self.table
        );
        let label = record.label.map(|labels| Box::new(labels_json(&labels)));

        self.exec(Self::statement(
            sql,
            vec![
                record.key.partition_key.into(),
                record.key.sort_key.into(),
                record.title.into(),
                record.body.into(),
                record.image.into(),
                Value::Json(label),
            ],
        ))
        .await?;
        Ok(())
    }

    async fn get(&self, key: &PostKey) -> Result<Option<PostRecord>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE partition_key = $1 AND sort_key = $2",
            self.table
        );
        let mut records = self
            .fetch(Self::statement(
                sql,
                vec![
                    key.partition_key.clone().into(),
                    key.sort_key.clone().into(),
                ],
            ))
            .await?;
        Ok(records.pop())
    }

    async fn query(&self, partition_key: &str) -> Result<Vec<PostRecord>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE partition_key = $1 ORDER BY sort_key",
            self.table
        );
        self.fetch(Self::statement(sql, vec![partition_key.into()]))
            .await
    }

    async fn scan(&self) -> Result<Vec<PostRecord>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY partition_key, sort_key",
            self.table
        );
        self.fetch(Self::statement(sql, Vec::new())).await
    }

    async fn delete(&self, key: &PostKey) -> Result<(), StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE partition_key = $1 AND sort_key = $2",
            self.table
        );
        let removed = self
            .exec(Self::statement(
                sql,
                vec![
                    key.partition_key.clone().into(),
                    key.sort_key.clone().into(),
                ],
            ))
            .await?;
        debug!(key = %key, removed, "Post row deleted");
        Ok(())
    }

    async fn set_image_labels(
        &self,
        key: &PostKey,
        image: &str,
        labels: &[String],
    ) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (partition_key, sort_key, image, label) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (partition_key, sort_key) DO UPDATE SET \
             image = EXCLUDED.image, label = EXCLUDED.label",
            self.table
        );

        self.exec(Self::statement(
            sql,
            vec![
                key.partition_key.clone().into(),
                key.sort_key.clone().into(),
                image.into(),
                Value::Json(Some(Box::new(labels_json(labels)))),
            ],
        ))
        .await?;
        Ok(())
    }
}

fn labels_json(labels: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        labels
            .iter()
            .cloned()
            .map(serde_json::Value::String)
            .collect(),
    )
}

fn to_store_error(e: DbErr) -> StoreError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(e.to_string()),
        other => StoreError::operation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: Option<serde_json::Value>) -> PostRow {
        PostRow {
            partition_key: "USER#bob".to_string(),
            sort_key: "POST#1".to_string(),
            title: Some("hi".to_string()),
            body: None,
            image: Some("bob/1/cat.png".to_string()),
            label,
        }
    }

    #[test]
    fn test_row_with_labels_converts() {
        let record =
            PostRecord::try_from(row(Some(serde_json::json!(["Cat", "Animal"])))).unwrap();
        assert_eq!(record.key.partition_key, "USER#bob");
        assert_eq!(
            record.label,
            Some(vec!["Cat".to_string(), "Animal".to_string()])
        );
        assert!(record.body.is_none());
    }

    #[test]
    fn test_row_without_labels_converts() {
        let record = PostRecord::try_from(row(None)).unwrap();
        assert!(record.label.is_none());
    }

    #[test]
    fn test_non_string_labels_are_malformed() {
        let err = PostRecord::try_from(row(Some(serde_json::json!([1, 2])))).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn test_labels_json_keeps_order() {
        assert_eq!(
            labels_json(&["B".to_string(), "A".to_string()]),
            serde_json::json!(["B", "A"])
        );
    }
}
