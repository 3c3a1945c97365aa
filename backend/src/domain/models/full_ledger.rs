//! Read model for the whole ledger tree.
use super::{Account, Kid, Ledger};

#[derive(Debug, Clone, PartialEq)]
pub struct KidWithAccounts {
    pub kid: Kid,
    pub accounts: Vec<Account>,
}

/// A ledger with its kids and their accounts, each list in (sort_order, id) order
#[derive(Debug, Clone, PartialEq)]
pub struct FullLedger {
    pub ledger: Ledger,
    pub kids: Vec<KidWithAccounts>,
}
