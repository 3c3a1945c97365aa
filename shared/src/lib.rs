use serde::{Deserialize, Serialize};

/// A family ledger. The `id` is the only credential needed to read or write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Opaque 32-character hex token
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kid {
    pub id: i64,
    pub ledger_id: String,
    pub name: String,
    pub emoji: String,
    /// Position among the kids of the same ledger (read order is sort_order, then id)
    pub sort_order: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub kid_id: i64,
    pub name: String,
    /// Running balance, may be negative
    pub balance: f64,
    /// Position among the accounts of the same kid (read order is sort_order, then id)
    pub sort_order: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A kid together with its ordered accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidWithAccounts {
    #[serde(flatten)]
    pub kid: Kid,
    pub accounts: Vec<Account>,
}

/// The whole ledger tree as rendered by the presentation layer.
///
/// Assembled from several sequential reads, so it is not a point-in-time snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullLedger {
    #[serde(flatten)]
    pub ledger: Ledger,
    pub kids: Vec<KidWithAccounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLedgerRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLedgerRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKidRequest {
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateKidRequest {
    pub name: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    /// Starting balance, 0 when omitted
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
}

/// Request to move an item next to its new neighbors.
///
/// `before_id` is the sibling that should end up immediately to the left,
/// `after_id` the one immediately to the right. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub before_id: Option<i64>,
    pub after_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBalanceRequest {
    /// Strictly positive amount
    pub amount: f64,
    /// Either "add" or "remove"
    pub operation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether a row was actually removed
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
