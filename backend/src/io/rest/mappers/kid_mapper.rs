use crate::domain::commands::kid::{CreateKidCommand, UpdateKidCommand};
use crate::domain::models::Kid as DomainKid;
use shared::{CreateKidRequest, Kid as SharedKid, UpdateKidRequest};

/// Mapper between shared kid DTOs and domain kid models.
pub struct KidMapper;

impl KidMapper {
    pub fn to_dto(domain: DomainKid) -> SharedKid {
        SharedKid {
            id: domain.id,
            ledger_id: domain.ledger_id,
            name: domain.name,
            emoji: domain.emoji,
            sort_order: domain.sort_order,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(ledger_id: String, request: CreateKidRequest) -> CreateKidCommand {
        CreateKidCommand {
            ledger_id,
            name: request.name,
            emoji: request.emoji,
        }
    }

    pub fn to_update_command(request: UpdateKidRequest) -> UpdateKidCommand {
        UpdateKidCommand {
            name: request.name,
            emoji: request.emoji,
        }
    }
}
