//! Balance management service for the family ledger.
//!
//! A balance change is a single `UPDATE ... SET balance = balance + delta`
//! statement. There is no separate read of the old balance, so two
//! concurrent adds or removes against one account are serialized by the
//! store and neither delta is lost. No floor is applied: removing more than
//! the account holds leaves it negative. A change that would push the
//! balance out of the finite range is refused and the row is left as it was.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::account::UpdateBalanceCommand;
use super::errors::{DomainError, DomainResult};
use super::models::Account;
use super::validation::validate_amount;
use crate::storage::{AccountRepository, DbConnection};

/// Service responsible for moving money in and out of accounts
#[derive(Clone)]
pub struct BalanceService {
    account_repository: AccountRepository,
}

impl BalanceService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let account_repository = AccountRepository::new((*db).clone());
        Self { account_repository }
    }

    /// Add to or remove from an account's balance.
    /// Returns `None` when the account does not exist, and a validation error
    /// when the new balance would not be a finite number.
    pub async fn update_balance(
        &self,
        command: UpdateBalanceCommand,
    ) -> DomainResult<Option<Account>> {
        let amount = validate_amount(command.amount)?;
        let delta = command.operation.signed(amount);

        let account = self
            .account_repository
            .apply_balance_delta(command.account_id, delta, Utc::now())
            .await?;

        match account {
            Some(account) => {
                info!(
                    "Balance {} {:.2} on account {}: new balance {:.2}",
                    command.operation, amount, account.id, account.balance
                );
                Ok(Some(account))
            }
            // The guarded update also skips rows whose result would not be finite
            None if self.account_repository.get_account(command.account_id).await?.is_some() => {
                warn!(
                    "Balance {} on account {} would overflow",
                    command.operation, command.account_id
                );
                Err(DomainError::validation("Resulting balance is out of range"))
            }
            None => {
                warn!("Cannot update balance: account {} not found", command.account_id);
                Ok(None)
            }
        }
    }
}
