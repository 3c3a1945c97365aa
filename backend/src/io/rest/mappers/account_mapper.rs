use crate::domain::commands::account::{
    CreateAccountCommand, UpdateAccountCommand, UpdateBalanceCommand,
};
use crate::domain::errors::DomainResult;
use crate::domain::models::{Account as DomainAccount, BalanceOperation};
use shared::{
    Account as SharedAccount, CreateAccountRequest, UpdateAccountRequest, UpdateBalanceRequest,
};

/// Mapper between shared account DTOs and domain account models.
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainAccount) -> SharedAccount {
        SharedAccount {
            id: domain.id,
            kid_id: domain.kid_id,
            name: domain.name,
            balance: domain.balance,
            sort_order: domain.sort_order,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(kid_id: i64, request: CreateAccountRequest) -> CreateAccountCommand {
        CreateAccountCommand {
            kid_id,
            name: request.name,
            balance: request.balance,
        }
    }

    pub fn to_update_command(request: UpdateAccountRequest) -> UpdateAccountCommand {
        UpdateAccountCommand { name: request.name }
    }

    /// Fails with a validation error when the operation is not "add" or "remove".
    pub fn to_balance_command(
        account_id: i64,
        request: UpdateBalanceRequest,
    ) -> DomainResult<UpdateBalanceCommand> {
        let operation: BalanceOperation = request.operation.parse()?;
        Ok(UpdateBalanceCommand {
            account_id,
            amount: request.amount,
            operation,
        })
    }
}
