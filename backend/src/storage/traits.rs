//! # Storage Traits
//!
//! Abstractions the domain layer programs against where one algorithm has to
//! work over more than one table.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Where an orderable item currently sits: its parent and its sort key
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingPosition<P> {
    pub parent_id: P,
    pub sort_order: f64,
}

/// Storage interface for a table whose rows are ordered among siblings
/// sharing the same parent.
///
/// Kids are ordered under a ledger and accounts under a kid; both
/// repositories implement this trait so the ordering engine never needs to
/// know which table it is moving rows in.
#[async_trait]
pub trait SiblingStorage: Send + Sync {
    /// The full record returned after a move
    type Item: Send;
    /// The parent key that groups siblings
    type ParentId: Clone + Send + Sync;

    /// Find the parent and sort key of an item
    async fn find_position(&self, id: i64) -> Result<Option<SiblingPosition<Self::ParentId>>>;

    /// Sort key of `id`, but only if it is a child of `parent_id`
    async fn sibling_sort_order(&self, parent_id: &Self::ParentId, id: i64) -> Result<Option<f64>>;

    /// Write a new sort key for a single item and return the updated record
    async fn set_sort_order(
        &self,
        id: i64,
        sort_order: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Self::Item>>;

    /// Rewrite every sibling's key to 1, 2, 3, ... in (sort_order, id) order,
    /// atomically. Returns the number of rows renumbered.
    async fn renumber_siblings(
        &self,
        parent_id: &Self::ParentId,
        now: DateTime<Utc>,
    ) -> Result<u64>;
}
