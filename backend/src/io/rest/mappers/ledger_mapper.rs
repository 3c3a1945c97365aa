use crate::domain::commands::ledger::{CreateLedgerCommand, UpdateLedgerCommand};
use crate::domain::models::{
    FullLedger as DomainFullLedger, KidWithAccounts as DomainKidWithAccounts,
    Ledger as DomainLedger,
};
use shared::{
    CreateLedgerRequest, FullLedger as SharedFullLedger, KidWithAccounts as SharedKidWithAccounts,
    Ledger as SharedLedger, UpdateLedgerRequest,
};

use super::{AccountMapper, KidMapper};

/// Mapper between shared ledger DTOs and domain ledger models.
pub struct LedgerMapper;

impl LedgerMapper {
    pub fn to_dto(domain: DomainLedger) -> SharedLedger {
        SharedLedger {
            id: domain.id,
            name: domain.name,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    /// Converts the assembled tree, keeping every list in its read order.
    pub fn to_full_ledger_dto(domain: DomainFullLedger) -> SharedFullLedger {
        SharedFullLedger {
            ledger: Self::to_dto(domain.ledger),
            kids: domain.kids.into_iter().map(Self::to_kid_with_accounts_dto).collect(),
        }
    }

    fn to_kid_with_accounts_dto(domain: DomainKidWithAccounts) -> SharedKidWithAccounts {
        SharedKidWithAccounts {
            kid: KidMapper::to_dto(domain.kid),
            accounts: domain.accounts.into_iter().map(AccountMapper::to_dto).collect(),
        }
    }

    pub fn to_create_command(request: CreateLedgerRequest) -> CreateLedgerCommand {
        CreateLedgerCommand { name: request.name }
    }

    pub fn to_update_command(request: UpdateLedgerRequest) -> UpdateLedgerCommand {
        UpdateLedgerCommand { name: request.name }
    }
}
