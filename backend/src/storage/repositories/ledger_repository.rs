use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::Ledger;
use crate::storage::connection::DbConnection;

/// Repository for ledger operations
#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
}

impl LedgerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a ledger and return the row as written.
    ///
    /// `None` means the insert produced no row, which only happens on a
    /// storage-level fault.
    pub async fn store_ledger(&self, ledger: &Ledger) -> Result<Option<Ledger>> {
        let row = sqlx::query(
            r#"
            INSERT INTO ledgers (id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&ledger.id)
        .bind(&ledger.name)
        .bind(format_timestamp(&ledger.created_at))
        .bind(format_timestamp(&ledger.updated_at))
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_ledger).transpose()
    }

    /// Get a ledger by ID
    pub async fn get_ledger(&self, ledger_id: &str) -> Result<Option<Ledger>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM ledgers
            WHERE id = ?
            "#,
        )
        .bind(ledger_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_ledger).transpose()
    }

    /// Rename a ledger
    pub async fn update_ledger(
        &self,
        ledger_id: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Ledger>> {
        let row = sqlx::query(
            r#"
            UPDATE ledgers
            SET name = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(format_timestamp(&now))
        .bind(ledger_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_ledger).transpose()
    }

    /// Delete a ledger. Kids and accounts go with it through the schema's cascades.
    pub async fn delete_ledger(&self, ledger_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ledgers WHERE id = ?")
            .bind(ledger_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_ledger(row: &SqliteRow) -> Result<Ledger> {
    Ok(Ledger {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}
