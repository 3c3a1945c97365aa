use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::account::{CreateAccountCommand, UpdateAccountCommand};
use super::commands::ordering::ReorderCommand;
use super::errors::DomainResult;
use super::models::Account;
use super::ordering::OrderingEngine;
use super::validation::{validate_balance, validate_name};
use crate::storage::{AccountRepository, DbConnection};

/// Service for managing a kid's money accounts
#[derive(Clone)]
pub struct AccountService {
    account_repository: AccountRepository,
    ordering: OrderingEngine<AccountRepository>,
}

impl AccountService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let account_repository = AccountRepository::new((*db).clone());
        let ordering = OrderingEngine::new(account_repository.clone());
        Self { account_repository, ordering }
    }

    /// Create an account at the end of the kid's list.
    /// Returns `None` when the kid does not exist.
    pub async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> DomainResult<Option<Account>> {
        let name = validate_name("Account name", &command.name)?;
        let balance = validate_balance(command.balance.unwrap_or(0.0))?;

        let account = self
            .account_repository
            .store_account(command.kid_id, &name, balance, Utc::now())
            .await?;

        match &account {
            Some(account) => info!(
                "Created account {} ('{}') for kid {} with balance {:.2}",
                account.id, account.name, account.kid_id, account.balance
            ),
            None => warn!("Cannot create account: kid {} not found", command.kid_id),
        }
        Ok(account)
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: i64) -> DomainResult<Option<Account>> {
        let account = self.account_repository.get_account(account_id).await?;
        if account.is_none() {
            warn!("Account not found: {}", account_id);
        }
        Ok(account)
    }

    /// List a kid's accounts in display order
    pub async fn list_accounts(&self, kid_id: i64) -> DomainResult<Vec<Account>> {
        Ok(self.account_repository.list_accounts(kid_id).await?)
    }

    /// Rename an account; an empty command only reads
    pub async fn update_account(
        &self,
        account_id: i64,
        command: UpdateAccountCommand,
    ) -> DomainResult<Option<Account>> {
        let name = match command.name {
            Some(name) => validate_name("Account name", &name)?,
            None => return self.get_account(account_id).await,
        };

        let account = self
            .account_repository
            .update_account(account_id, &name, Utc::now())
            .await?;

        match &account {
            Some(account) => info!("Renamed account {} to '{}'", account.id, account.name),
            None => warn!("Cannot update account {}: not found", account_id),
        }
        Ok(account)
    }

    pub async fn delete_account(&self, account_id: i64) -> DomainResult<bool> {
        let deleted = self.account_repository.delete_account(account_id).await?;
        info!("Delete account {}: removed={}", account_id, deleted);
        Ok(deleted)
    }

    /// Move an account between two of its siblings
    pub async fn reorder_account(
        &self,
        account_id: i64,
        command: ReorderCommand,
    ) -> DomainResult<Option<Account>> {
        info!(
            "Reordering account {} (before={:?}, after={:?})",
            account_id, command.before_id, command.after_id
        );
        self.ordering.reorder(account_id, command).await
    }

    /// Rewrite a kid's account keys to 1, 2, 3, ... in their current order
    pub async fn renumber_accounts(&self, kid_id: i64) -> DomainResult<u64> {
        self.ordering.renumber(&kid_id).await
    }

    /// Whether the account exists inside this ledger
    pub async fn account_belongs_to_ledger(
        &self,
        ledger_id: &str,
        account_id: i64,
    ) -> DomainResult<bool> {
        Ok(self.account_repository.account_in_ledger(ledger_id, account_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::kid::CreateKidCommand;
    use crate::domain::commands::ledger::CreateLedgerCommand;
    use crate::domain::errors::DomainError;
    use crate::domain::{KidService, LedgerService};

    async fn create_test_service() -> (AccountService, i64) {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        let ledger = LedgerService::new(db.clone())
            .create_ledger(CreateLedgerCommand { name: "Smith".to_string() })
            .await
            .unwrap();
        let kid = KidService::new(db.clone())
            .create_kid(CreateKidCommand {
                ledger_id: ledger.id,
                name: "Emma".to_string(),
                emoji: "👧".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        (AccountService::new(db), kid.id)
    }

    fn create_command(kid_id: i64, name: &str, balance: Option<f64>) -> CreateAccountCommand {
        CreateAccountCommand {
            kid_id,
            name: name.to_string(),
            balance,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_account() {
        let (service, kid_id) = create_test_service().await;

        let account = service
            .create_account(create_command(kid_id, "Savings", Some(25.0)))
            .await
            .unwrap()
            .unwrap();
        let fetched = service.get_account(account.id).await.unwrap().unwrap();

        assert_eq!(fetched.balance, 25.0);
        assert_eq!(fetched.name, "Savings");
    }

    #[tokio::test]
    async fn test_balance_defaults_to_zero() {
        let (service, kid_id) = create_test_service().await;
        let account = service
            .create_account(create_command(kid_id, "Spending", None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.balance, 0.0);
    }

    #[tokio::test]
    async fn test_create_account_validation_and_missing_kid() {
        let (service, kid_id) = create_test_service().await;

        let blank = service.create_account(create_command(kid_id, "   ", None)).await;
        assert!(matches!(blank, Err(DomainError::Validation(_))));

        let nan = service.create_account(create_command(kid_id, "Savings", Some(f64::NAN))).await;
        assert!(matches!(nan, Err(DomainError::Validation(_))));

        let orphan =
            service.create_account(create_command(kid_id + 100, "Savings", None)).await.unwrap();
        assert!(orphan.is_none());
    }

    #[tokio::test]
    async fn test_update_account_name() {
        let (service, kid_id) = create_test_service().await;
        let account = service
            .create_account(create_command(kid_id, "Savings", Some(3.0)))
            .await
            .unwrap()
            .unwrap();

        let renamed = service
            .update_account(account.id, UpdateAccountCommand { name: Some("College".to_string()) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "College");
        assert_eq!(renamed.balance, 3.0);

        let read = service
            .update_account(account.id, UpdateAccountCommand::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read, renamed);
    }

    #[tokio::test]
    async fn test_delete_account_twice() {
        let (service, kid_id) = create_test_service().await;
        let account = service
            .create_account(create_command(kid_id, "Savings", None))
            .await
            .unwrap()
            .unwrap();

        assert!(service.delete_account(account.id).await.unwrap());
        assert!(!service.delete_account(account.id).await.unwrap());
        assert!(service.get_account(account.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reorder_accounts() {
        let (service, kid_id) = create_test_service().await;
        let savings = service
            .create_account(create_command(kid_id, "Savings", None))
            .await
            .unwrap()
            .unwrap();
        let spending = service
            .create_account(create_command(kid_id, "Spending", None))
            .await
            .unwrap()
            .unwrap();
        let giving = service
            .create_account(create_command(kid_id, "Giving", None))
            .await
            .unwrap()
            .unwrap();

        service
            .reorder_account(
                giving.id,
                ReorderCommand { before_id: Some(savings.id), after_id: Some(spending.id) },
            )
            .await
            .unwrap()
            .unwrap();

        let names: Vec<String> =
            service.list_accounts(kid_id).await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Savings", "Giving", "Spending"]);
        assert_eq!(service.renumber_accounts(kid_id).await.unwrap(), 3);
    }
}
