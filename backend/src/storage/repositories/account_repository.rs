use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_timestamp, parse_timestamp};
use crate::domain::models::Account;
use crate::storage::connection::DbConnection;
use crate::storage::traits::{SiblingPosition, SiblingStorage};

const ACCOUNT_COLUMNS: &str = "id, kid_id, name, balance, sort_order, created_at, updated_at";

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new account at the end of its kid's list.
    /// Returns `None` when the kid does not exist.
    pub async fn store_account(
        &self,
        kid_id: i64,
        name: &str,
        balance: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>> {
        let query = format!(
            r#"
            INSERT INTO accounts (kid_id, name, balance, sort_order, created_at, updated_at)
            SELECT ?1, ?2, ?3,
                   COALESCE((SELECT MAX(sort_order) FROM accounts WHERE kid_id = ?1) + 1.0, 0.0),
                   ?4, ?4
            WHERE EXISTS (SELECT 1 FROM kids WHERE id = ?1)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(kid_id)
            .bind(name)
            .bind(balance)
            .bind(format_timestamp(&now))
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: i64) -> Result<Option<Account>> {
        let query = format!("SELECT {} FROM accounts WHERE id = ?", ACCOUNT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(account_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// List the accounts of a kid in (sort_order, id) order
    pub async fn list_accounts(&self, kid_id: i64) -> Result<Vec<Account>> {
        let query = format!(
            "SELECT {} FROM accounts WHERE kid_id = ? ORDER BY sort_order ASC, id ASC",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(kid_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_account).collect()
    }

    /// Rename an account
    pub async fn update_account(
        &self,
        account_id: i64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>> {
        let query = format!(
            "UPDATE accounts SET name = ?, updated_at = ? WHERE id = ? RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(name)
            .bind(format_timestamp(&now))
            .bind(account_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Add a signed delta to the balance in a single statement.
    ///
    /// The read and the write happen inside one UPDATE, so two concurrent
    /// calls against the same account cannot both start from the same stale
    /// balance. The row is left untouched, and `None` returned, when the new
    /// balance would overflow `f64`.
    pub async fn apply_balance_delta(
        &self,
        account_id: i64,
        delta: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>> {
        let query = format!(
            r#"
            UPDATE accounts
            SET balance = balance + ?1, updated_at = ?2
            WHERE id = ?3 AND abs(balance + ?1) <= ?4
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(delta)
            .bind(format_timestamp(&now))
            .bind(account_id)
            .bind(f64::MAX)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Delete an account
    pub async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(account_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the account exists and its kid belongs to the ledger
    pub async fn account_in_ledger(&self, ledger_id: &str, account_id: i64) -> Result<bool> {
        let found = sqlx::query(
            r#"
            SELECT 1
            FROM accounts a
            JOIN kids k ON k.id = a.kid_id
            WHERE a.id = ? AND k.ledger_id = ?
            "#,
        )
        .bind(account_id)
        .bind(ledger_id)
        .fetch_optional(self.db.pool())
        .await?
        .is_some();
        Ok(found)
    }
}

#[async_trait]
impl SiblingStorage for AccountRepository {
    type Item = Account;
    type ParentId = i64;

    async fn find_position(&self, id: i64) -> Result<Option<SiblingPosition<i64>>> {
        let row = sqlx::query("SELECT kid_id, sort_order FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(SiblingPosition {
                parent_id: r.try_get("kid_id")?,
                sort_order: r.try_get("sort_order")?,
            })),
            None => Ok(None),
        }
    }

    async fn sibling_sort_order(&self, parent_id: &i64, id: i64) -> Result<Option<f64>> {
        let sort_order =
            sqlx::query_scalar("SELECT sort_order FROM accounts WHERE id = ? AND kid_id = ?")
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
    ) -> Result<Option<Account>> {
        let query = format!(
            "UPDATE accounts SET sort_order = ?, updated_at = ? WHERE id = ? RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(sort_order)
            .bind(format_timestamp(&now))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn renumber_siblings(&self, parent_id: &i64, now: DateTime<Utc>) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM accounts WHERE kid_id = ? ORDER BY sort_order ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&mut *tx)
        .await?;

        let updated_at = format_timestamp(&now);
        for (position, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE accounts SET sort_order = ?, updated_at = ? WHERE id = ?")
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

fn row_to_account(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        kid_id: row.try_get("kid_id")?,
        name: row.try_get("name")?,
        balance: row.try_get("balance")?,
        sort_order: row.try_get("sort_order")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Ledger;
    use crate::storage::repositories::{KidRepository, LedgerRepository};

    struct Fixture {
        repo: AccountRepository,
        kids: KidRepository,
        ledger_id: String,
        kid_id: i64,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let now = Utc::now();
        let ledger = Ledger {
            id: Ledger::generate_id(),
            name: "Smith".to_string(),
            created_at: now,
            updated_at: now,
        };
        LedgerRepository::new(db.clone()).store_ledger(&ledger).await.unwrap();
        let kids = KidRepository::new(db.clone());
        let kid = kids.store_kid(&ledger.id, "Emma", "👧", now).await.unwrap().unwrap();

        Fixture {
            repo: AccountRepository::new(db),
            kids,
            ledger_id: ledger.id,
            kid_id: kid.id,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_account() {
        let f = setup_test().await;

        let stored =
            f.repo.store_account(f.kid_id, "Savings", 25.0, Utc::now()).await.unwrap().unwrap();
        let fetched = f.repo.get_account(stored.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Savings");
        assert_eq!(fetched.balance, 25.0);
        assert_eq!(fetched.kid_id, f.kid_id);
        assert_eq!(fetched.sort_order, 0.0);
    }

    #[tokio::test]
    async fn test_store_account_for_missing_kid_returns_none() {
        let f = setup_test().await;
        let result = f.repo.store_account(424242, "Savings", 0.0, Utc::now()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_apply_balance_delta_allows_negative() {
        let f = setup_test().await;
        let account =
            f.repo.store_account(f.kid_id, "Spending", 10.0, Utc::now()).await.unwrap().unwrap();

        let after_add =
            f.repo.apply_balance_delta(account.id, 5.0, Utc::now()).await.unwrap().unwrap();
        assert_eq!(after_add.balance, 15.0);

        let after_remove =
            f.repo.apply_balance_delta(account.id, -20.0, Utc::now()).await.unwrap().unwrap();
        assert_eq!(after_remove.balance, -5.0);

        assert!(f.repo.apply_balance_delta(9999, 1.0, Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_account_in_ledger_follows_kid() {
        let f = setup_test().await;
        let account =
            f.repo.store_account(f.kid_id, "Savings", 0.0, Utc::now()).await.unwrap().unwrap();

        assert!(f.repo.account_in_ledger(&f.ledger_id, account.id).await.unwrap());
        assert!(!f.repo.account_in_ledger("someone-else", account.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_accounts_cascade_with_kid() {
        let f = setup_test().await;
        let account =
            f.repo.store_account(f.kid_id, "Savings", 0.0, Utc::now()).await.unwrap().unwrap();

        assert!(f.kids.delete_kid(f.kid_id).await.unwrap());
        assert!(f.repo.get_account(account.id).await.unwrap().is_none());
        assert!(!f.repo.delete_account(account.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_accounts_in_sibling_order() {
        let f = setup_test().await;
        let savings =
            f.repo.store_account(f.kid_id, "Savings", 0.0, Utc::now()).await.unwrap().unwrap();
        let spending =
            f.repo.store_account(f.kid_id, "Spending", 0.0, Utc::now()).await.unwrap().unwrap();
        f.repo.set_sort_order(spending.id, -1.0, Utc::now()).await.unwrap();

        let names: Vec<String> =
            f.repo.list_accounts(f.kid_id).await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Spending".to_string(), "Savings".to_string()]);
        assert_eq!(f.repo.sibling_sort_order(&f.kid_id, savings.id).await.unwrap(), Some(0.0));
        assert_eq!(f.repo.sibling_sort_order(&(f.kid_id + 1), savings.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_apply_balance_delta_refuses_overflow() {
        let f = setup_test().await;
        let account =
            f.repo.store_account(f.kid_id, "Savings", 1.7e308, Utc::now()).await.unwrap().unwrap();

        let overflowed = f.repo.apply_balance_delta(account.id, 1.7e308, Utc::now()).await.unwrap();
        assert!(overflowed.is_none());

        let stored = f.repo.get_account(account.id).await.unwrap().unwrap();
        assert_eq!(stored.balance, 1.7e308);
        assert_eq!(stored.updated_at, account.updated_at);
    }
}
