use std::sync::Arc;
use tracing::{info, warn};

use super::errors::DomainResult;
use super::models::{FullLedger, KidWithAccounts};
use crate::storage::{AccountRepository, DbConnection, KidRepository, LedgerRepository};

/// Read-only façade that assembles a ledger with all of its kids and accounts.
///
/// The tree is built from sequential reads (ledger, kids, then the accounts
/// of each kid). It is not a snapshot: a write that lands between two of
/// those reads is visible in some parts of the result and not in others.
#[derive(Clone)]
pub struct FullLedgerService {
    ledger_repository: LedgerRepository,
    kid_repository: KidRepository,
    account_repository: AccountRepository,
}

impl FullLedgerService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            ledger_repository: LedgerRepository::new((*db).clone()),
            kid_repository: KidRepository::new((*db).clone()),
            account_repository: AccountRepository::new((*db).clone()),
        }
    }

    pub async fn get_full_ledger(&self, ledger_id: &str) -> DomainResult<Option<FullLedger>> {
        let Some(ledger) = self.ledger_repository.get_ledger(ledger_id).await? else {
            warn!("Full ledger requested for unknown ledger");
            return Ok(None);
        };

        let kids = self.kid_repository.list_kids(ledger_id).await?;
        let mut kids_with_accounts = Vec::with_capacity(kids.len());
        for kid in kids {
            let accounts = self.account_repository.list_accounts(kid.id).await?;
            kids_with_accounts.push(KidWithAccounts { kid, accounts });
        }

        info!(
            "Loaded ledger '{}' with {} kids",
            ledger.name,
            kids_with_accounts.len()
        );
        Ok(Some(FullLedger {
            ledger,
            kids: kids_with_accounts,
        }))
    }
}
