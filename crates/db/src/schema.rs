//! Posts table definition.
//!
//! One row per post, keyed by `(partition_key, sort_key)`. The table name
//! comes from configuration, so it is checked before being spliced into SQL.

use postagram_shared::is_sql_identifier;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

/// Rejected table name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid table name")]
pub struct TableNameError(pub String);

/// Returns `table` double-quoted, after checking it is a plain identifier.
///
/// # Errors
///
/// Returns `TableNameError` unless the name matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn quoted_table(table: &str) -> Result<String, TableNameError> {
    if is_sql_identifier(table) {
        Ok(format!("\"{table}\""))
    } else {
        Err(TableNameError(table.to_string()))
    }
}

/// DDL for the posts table.
///
/// # Errors
///
/// Returns `TableNameError` for an unusable table name.
pub fn create_posts_table_sql(table: &str) -> Result<String, TableNameError> {
    let table = quoted_table(table)?;
    Ok(format!(
        r"
CREATE TABLE IF NOT EXISTS {table} (
    partition_key TEXT NOT NULL,
    sort_key TEXT NOT NULL,
    title TEXT,
    body TEXT,
    image TEXT,
    label JSONB,
    PRIMARY KEY (partition_key, sort_key)
);
"
    ))
}

/// Creates the posts table if it does not exist yet.
///
/// # Errors
///
/// Returns an error for an unusable table name or if the DDL fails.
pub async fn ensure_posts_table(db: &DatabaseConnection, table: &str) -> Result<(), DbErr> {
    let sql = create_posts_table_sql(table).map_err(|e| DbErr::Custom(e.to_string()))?;
    db.execute_unprepared(&sql).await?;
    info!(table = %table, "Posts table ready");
    Ok(())
}
