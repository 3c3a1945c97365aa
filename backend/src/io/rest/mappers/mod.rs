//! Conversions between the `shared` DTOs and domain types.
//!
//! Outbound records are mapped field by field with timestamps rendered as
//! RFC 3339. Inbound requests become domain commands; only the balance
//! operation tag can fail to map.

pub mod account_mapper;
pub mod kid_mapper;
pub mod ledger_mapper;

pub use account_mapper::AccountMapper;
pub use kid_mapper::KidMapper;
pub use ledger_mapper::LedgerMapper;

use crate::domain::commands::ordering::ReorderCommand;
use shared::ReorderRequest;

/// Reorder requests look the same for kids and accounts
pub fn to_reorder_command(request: ReorderRequest) -> ReorderCommand {
    ReorderCommand {
        before_id: request.before_id,
        after_id: request.after_id,
    }
}
