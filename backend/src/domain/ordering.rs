//! Fractional ordering of sibling lists.
//!
//! An item is moved by naming its new left neighbor (`before_id`) and/or right
//! neighbor (`after_id`). The new sort key is derived from the neighbors' keys
//! alone, so a move is a single write and no other sibling is touched:
//!
//! | before | after | new key              |
//! |--------|-------|----------------------|
//! | -      | -     | `0`                  |
//! | -      | `a`   | `a / 2`              |
//! | `b`    | -     | `b + 1`              |
//! | `b`    | `a`   | midpoint of `b`, `a` |
//!
//! Readers always order by `(sort_order, id)`, so equal keys still read back
//! deterministically.
//!
//! Repeated insertion into the same gap halves it every time and eventually
//! runs out of `f64` precision. When a computed key no longer lands strictly
//! on the requested side of its neighbors, the sibling list is renumbered to
//! `1, 2, 3, ...` in one transaction and the key is computed again. This is
//! the only time more than one row is written. Neighbors named the wrong way
//! round are rejected before anything is written.

use chrono::Utc;
use tracing::{info, warn};

use super::commands::ordering::ReorderCommand;
use super::errors::{DomainError, DomainResult};
use crate::storage::traits::SiblingStorage;

/// Compute the sort key for an item placed after `before` and ahead of `after`
pub fn compute_sort_key(before: Option<f64>, after: Option<f64>) -> f64 {
    match (before, after) {
        (None, None) => 0.0,
        (None, Some(after)) => after / 2.0,
        (Some(before), None) => before + 1.0,
        (Some(before), Some(after)) => (before + after) / 2.0,
    }
}

/// Whether `key` sorts strictly after `before` and strictly ahead of `after`
pub fn key_fits(key: f64, before: Option<f64>, after: Option<f64>) -> bool {
    before.map_or(true, |b| key > b) && after.map_or(true, |a| key < a)
}

/// Moves items within one kind of sibling list
#[derive(Clone)]
pub struct OrderingEngine<S> {
    storage: S,
}

impl<S: SiblingStorage> OrderingEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Move `id` between the named neighbors.
    ///
    /// Returns `Ok(None)` when `id` itself does not exist,
    /// `NeighborNotFound` when a named neighbor is not a sibling of `id`, and
    /// a validation error when `before_id` sorts after `after_id`.
    pub async fn reorder(&self, id: i64, command: ReorderCommand) -> DomainResult<Option<S::Item>> {
        Self::validate_command(id, &command)?;

        let position = match self.storage.find_position(id).await? {
            Some(position) => position,
            None => {
                warn!("Cannot reorder {}: item not found", id);
                return Ok(None);
            }
        };
        let parent_id = position.parent_id;

        let (before, after) = self.neighbor_keys(&parent_id, &command).await?;
        Self::check_neighbor_order(before, after)?;
        let mut key = compute_sort_key(before, after);

        let has_neighbors = before.is_some() || after.is_some();
        if has_neighbors && !key_fits(key, before, after) {
            info!(
                "Sort key {} does not fit between {:?} and {:?}; renumbering siblings of {}",
                key, before, after, id
            );
            self.storage.renumber_siblings(&parent_id, Utc::now()).await?;

            // Tied neighbors come back in (sort_order, id) order, which may not
            // be the order the caller named them in
            let (before, after) = self.neighbor_keys(&parent_id, &command).await?;
            Self::check_neighbor_order(before, after)?;
            key = compute_sort_key(before, after);
            if !key_fits(key, before, after) {
                warn!("Sort key {} still does not fit after renumbering {}", key, id);
            }
        }

        let item = self.storage.set_sort_order(id, key, Utc::now()).await?;
        if item.is_none() {
            // Deleted between the position lookup and the write
            warn!("Item {} disappeared during reorder", id);
        }
        Ok(item)
    }

    /// Renumber every sibling under `parent_id` to 1, 2, 3, ... keeping the current order
    pub async fn renumber(&self, parent_id: &S::ParentId) -> DomainResult<u64> {
        let count = self.storage.renumber_siblings(parent_id, Utc::now()).await?;
        info!("Renumbered {} siblings", count);
        Ok(count)
    }

    fn validate_command(id: i64, command: &ReorderCommand) -> DomainResult<()> {
        if command.before_id == Some(id) || command.after_id == Some(id) {
            return Err(DomainError::validation("An item cannot be its own neighbor"));
        }
        if command.before_id.is_some() && command.before_id == command.after_id {
            return Err(DomainError::validation("before_id and after_id must differ"));
        }
        Ok(())
    }

    /// The left neighbor may tie the right one but never sort after it
    fn check_neighbor_order(before: Option<f64>, after: Option<f64>) -> DomainResult<()> {
        match (before, after) {
            (Some(before), Some(after)) if before > after => {
                Err(DomainError::validation("before_id must sort ahead of after_id"))
            }
            _ => Ok(()),
        }
    }

    async fn neighbor_keys(
        &self,
        parent_id: &S::ParentId,
        command: &ReorderCommand,
    ) -> DomainResult<(Option<f64>, Option<f64>)> {
        let before = match command.before_id {
            Some(before_id) => Some(self.sibling_key(parent_id, before_id).await?),
            None => None,
        };
        let after = match command.after_id {
            Some(after_id) => Some(self.sibling_key(parent_id, after_id).await?),
            None => None,
        };
        Ok((before, after))
    }

    async fn sibling_key(&self, parent_id: &S::ParentId, id: i64) -> DomainResult<f64> {
        self.storage
            .sibling_sort_order(parent_id, id)
            .await?
            .ok_or(DomainError::NeighborNotFound { id })
    }
}
