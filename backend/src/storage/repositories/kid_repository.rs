use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::Kid;
use crate::storage::connection::DbConnection;
use crate::storage::traits::{SiblingPosition, SiblingStorage};

const KID_COLUMNS: &str = "id, ledger_id, name, emoji, sort_order, created_at, updated_at";

/// Repository for kid operations
#[derive(Clone)]
pub struct KidRepository {
    db: DbConnection,
}

impl KidRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new kid at the end of its ledger's list.
    ///
    /// The ledger check, the sort key and the insert are one statement.
    /// Returns `None` when the ledger does not exist.
    pub async fn store_kid(
        &self,
        ledger_id: &str,
        name: &str,
        emoji: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Kid>> {
        let query = format!(
            r#"
            INSERT INTO kids (ledger_id, name, emoji, sort_order, created_at, updated_at)
            SELECT ?1, ?2, ?3,
                   COALESCE((SELECT MAX(sort_order) FROM kids WHERE ledger_id = ?1) + 1.0, 0.0),
                   ?4, ?4
            WHERE EXISTS (SELECT 1 FROM ledgers WHERE id = ?1)
            RETURNING {}
            "#,
            KID_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(ledger_id)
            .bind(name)
            .bind(emoji)
            .bind(format_timestamp(&now))
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_kid).transpose()
    }

    /// Get a kid by ID
    pub async fn get_kid(&self, kid_id: i64) -> Result<Option<Kid>> {
        let query = format!("SELECT {} FROM kids WHERE id = ?", KID_COLUMNS);
        let row = sqlx::query(&query)
            .bind(kid_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_kid).transpose()
    }

    /// List the kids of a ledger in (sort_order, id) order
    pub async fn list_kids(&self, ledger_id: &str) -> Result<Vec<Kid>> {
        let query = format!(
            "SELECT {} FROM kids WHERE ledger_id = ? ORDER BY sort_order ASC, id ASC",
            KID_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(ledger_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_kid).collect()
    }

    /// Apply a partial update. Fields passed as `None` keep their stored value.
    pub async fn update_kid(
        &self,
        kid_id: i64,
        name: Option<&str>,
        emoji: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Kid>> {
        let query = format!(
            r#"
            UPDATE kids
            SET name = COALESCE(?, name),
                emoji = COALESCE(?, emoji),
                updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            KID_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(name)
            .bind(emoji)
            .bind(format_timestamp(&now))
            .bind(kid_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_kid).transpose()
    }

    /// Delete a kid; its accounts are removed by the cascade
    pub async fn delete_kid(&self, kid_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kids WHERE id = ?")
            .bind(kid_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the kid exists and belongs to the ledger
    pub async fn kid_in_ledger(&self, ledger_id: &str, kid_id: i64) -> Result<bool> {
        let found = sqlx::query("SELECT 1 FROM kids WHERE id = ? AND ledger_id = ?")
            .bind(kid_id)
            .bind(ledger_id)
            .fetch_optional(self.db.pool())
            .await?
            .is_some();
        Ok(found)
    }
}

#[async_trait]
impl SiblingStorage for KidRepository {
    type Item = Kid;
    type ParentId = String;

    async fn find_position(&self, id: i64) -> Result<Option<SiblingPosition<String>>> {
        let row = sqlx::query("SELECT ledger_id, sort_order FROM kids WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(SiblingPosition {
                parent_id: r.try_get("ledger_id")?,
                sort_order: r.try_get("sort_order")?,
            })),
            None => Ok(None),
        }
    }

    async fn sibling_sort_order(&self, parent_id: &String, id: i64) -> Result<Option<f64>> {
        let sort_order =
            sqlx::query_scalar("SELECT sort_order FROM kids WHERE id = ? AND ledger_id = ?")
                .bind(id)
                .bind(parent_id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(sort_order)
    }

    async fn set_sort_order(
        &self,
        id: i64,
        sort_order: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Kid>> {
        let query = format!(
            "UPDATE kids SET sort_order = ?, updated_at = ? WHERE id = ? RETURNING {}",
            KID_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(sort_order)
            .bind(format_timestamp(&now))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_kid).transpose()
    }

    async fn renumber_siblings(&self, parent_id: &String, now: DateTime<Utc>) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM kids WHERE ledger_id = ? ORDER BY sort_order ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&mut *tx)
        .await?;

        let updated_at = format_timestamp(&now);
        for (position, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE kids SET sort_order = ?, updated_at = ? WHERE id = ?")
                .bind((position + 1) as f64)
                .bind(&updated_at)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(ids.len() as u64)
    }
}

fn row_to_kid(row: &SqliteRow) -> Result<Kid> {
    Ok(Kid {
        id: row.try_get("id")?,
        ledger_id: row.try_get("ledger_id")?,
        name: row.try_get("name")?,
        emoji: row.try_get("emoji")?,
        sort_order: row.try_get("sort_order")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}
