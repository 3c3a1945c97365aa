use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::kid::{CreateKidCommand, UpdateKidCommand};
use super::commands::ordering::ReorderCommand;
use super::errors::DomainResult;
use super::models::Kid;
use super::ordering::OrderingEngine;
use super::validation::{validate_emoji, validate_name};
use crate::storage::{DbConnection, KidRepository};

/// Service for managing the kids of a ledger
#[derive(Clone)]
pub struct KidService {
    kid_repository: KidRepository,
    ordering: OrderingEngine<KidRepository>,
}

impl KidService {
    pub fn new(db: Arc<DbConnection>) -> Self {
        let kid_repository = KidRepository::new((*db).clone());
        let ordering = OrderingEngine::new(kid_repository.clone());
        Self { kid_repository, ordering }
    }

    /// Create a kid at the end of the ledger's list.
    /// Returns `None` when the ledger does not exist.
    pub async fn create_kid(&self, command: CreateKidCommand) -> DomainResult<Option<Kid>> {
        let name = validate_name("Kid name", &command.name)?;
        let emoji = validate_emoji(&command.emoji)?;

        let kid = self
            .kid_repository
            .store_kid(&command.ledger_id, &name, &emoji, Utc::now())
            .await?;

        match &kid {
            Some(kid) => info!("Created kid {} ('{}')", kid.id, kid.name),
            None => warn!("Cannot create kid '{}': ledger not found", name),
        }
        Ok(kid)
    }

    /// Get a kid by ID
    pub async fn get_kid(&self, kid_id: i64) -> DomainResult<Option<Kid>> {
        let kid = self.kid_repository.get_kid(kid_id).await?;
        if kid.is_none() {
            warn!("Kid not found: {}", kid_id);
        }
        Ok(kid)
    }

    /// List a ledger's kids in display order
    pub async fn list_kids(&self, ledger_id: &str) -> DomainResult<Vec<Kid>> {
        let kids = self.kid_repository.list_kids(ledger_id).await?;
        info!("Found {} kids", kids.len());
        Ok(kids)
    }

    /// Apply a partial update; an empty command only reads
    pub async fn update_kid(
        &self,
        kid_id: i64,
        command: UpdateKidCommand,
    ) -> DomainResult<Option<Kid>> {
        let name = command.name.as_deref().map(|n| validate_name("Kid name", n)).transpose()?;
        let emoji = command.emoji.as_deref().map(validate_emoji).transpose()?;

        if name.is_none() && emoji.is_none() {
            return self.get_kid(kid_id).await;
        }

        let kid = self
            .kid_repository
            .update_kid(kid_id, name.as_deref(), emoji.as_deref(), Utc::now())
            .await?;

        match &kid {
            Some(kid) => info!("Updated kid {}", kid.id),
            None => warn!("Cannot update kid {}: not found", kid_id),
        }
        Ok(kid)
    }

    /// Delete a kid and, through the cascade, its accounts
    pub async fn delete_kid(&self, kid_id: i64) -> DomainResult<bool> {
        let deleted = self.kid_repository.delete_kid(kid_id).await?;
        info!("Delete kid {}: removed={}", kid_id, deleted);
        Ok(deleted)
    }

    /// Move a kid between two of its siblings
    pub async fn reorder_kid(
        &self,
        kid_id: i64,
        command: ReorderCommand,
    ) -> DomainResult<Option<Kid>> {
        info!(
            "Reordering kid {} (before={:?}, after={:?})",
            kid_id, command.before_id, command.after_id
        );
        self.ordering.reorder(kid_id, command).await
    }

    /// Rewrite a ledger's kid keys to 1, 2, 3, ... in their current order
    pub async fn renumber_kids(&self, ledger_id: &str) -> DomainResult<u64> {
        self.ordering.renumber(&ledger_id.to_string()).await
    }

    /// Whether the kid exists inside this ledger
    pub async fn kid_belongs_to_ledger(&self, ledger_id: &str, kid_id: i64) -> DomainResult<bool> {
        Ok(self.kid_repository.kid_in_ledger(ledger_id, kid_id).await?)
    }
}
