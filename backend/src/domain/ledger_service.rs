use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::ledger::{CreateLedgerCommand, UpdateLedgerCommand};
use super::errors::{DomainError, DomainResult};
use super::models::Ledger;
use super::validation::validate_name;
use crate::storage::{DbConnection, LedgerRepository};

/// Service for creating and maintaining ledgers
#[derive(Clone)]
pub struct LedgerService {
    ledger_repository: LedgerRepository,
}

impl LedgerService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let ledger_repository = LedgerRepository::new((*db).clone());
        Self { ledger_repository }
    }

    /// Create a new ledger with a freshly generated unguessable id
    pub async fn create_ledger(&self, command: CreateLedgerCommand) -> DomainResult<Ledger> {
        let name = validate_name("Ledger name", &command.name)?;

        let now = Utc::now();
        let ledger = Ledger {
            id: Ledger::generate_id(),
            name,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .ledger_repository
            .store_ledger(&ledger)
            .await?
            .ok_or_else(|| {
                DomainError::CreationFailure("ledger insert returned no row".to_string())
            })?;

        info!("Created ledger '{}'", stored.name);
        Ok(stored)
    }

    /// Get a ledger by ID
    pub async fn get_ledger(&self, ledger_id: &str) -> DomainResult<Option<Ledger>> {
        let ledger = self.ledger_repository.get_ledger(ledger_id).await?;
        if ledger.is_none() {
            warn!("Ledger not found");
        }
        Ok(ledger)
    }

    /// Rename a ledger. An empty command only reads.
    pub async fn update_ledger(
        &self,
        ledger_id: &str,
        command: UpdateLedgerCommand,
    ) -> DomainResult<Option<Ledger>> {
        let name = match command.name {
            Some(name) => validate_name("Ledger name", &name)?,
            None => return self.get_ledger(ledger_id).await,
        };

        let updated = self.ledger_repository.update_ledger(ledger_id, &name, Utc::now()).await?;
        match &updated {
            Some(ledger) => info!("Renamed ledger to '{}'", ledger.name),
            None => warn!("Cannot update ledger: not found"),
        }
        Ok(updated)
    }

    /// Delete a ledger together with all of its kids and accounts
    pub async fn delete_ledger(&self, ledger_id: &str) -> DomainResult<bool> {
        let deleted = self.ledger_repository.delete_ledger(ledger_id).await?;
        info!("Delete ledger: removed={}", deleted);
        Ok(deleted)
    }
}
