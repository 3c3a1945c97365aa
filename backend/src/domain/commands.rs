//! Domain-level command types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod ledger {
    /// Input for creating a new ledger.
    #[derive(Debug, Clone)]
    pub struct CreateLedgerCommand {
        pub name: String,
    }

    /// Partial update of a ledger. An empty command is a no-op read.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateLedgerCommand {
        pub name: Option<String>,
    }
}

pub mod kid {
    /// Input for creating a kid under a ledger.
    #[derive(Debug, Clone)]
    pub struct CreateKidCommand {
        pub ledger_id: String,
        pub name: String,
        pub emoji: String,
    }

    /// Partial update of a kid. An empty command is a no-op read.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateKidCommand {
        pub name: Option<String>,
        pub emoji: Option<String>,
    }
}

pub mod account {
    use crate::domain::models::BalanceOperation;

    /// Input for creating an account under a kid.
    #[derive(Debug, Clone)]
    pub struct CreateAccountCommand {
        pub kid_id: i64,
        pub name: String,
        /// Defaults to 0
        pub balance: Option<f64>,
    }

    /// Partial update of an account. An empty command is a no-op read.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateAccountCommand {
        pub name: Option<String>,
    }

    /// Input for moving money in or out of an account.
    #[derive(Debug, Clone)]
    pub struct UpdateBalanceCommand {
        pub account_id: i64,
        pub amount: f64,
        pub operation: BalanceOperation,
    }
}

pub mod ordering {
    /// New neighbors for an item being moved. Both sides are optional.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ReorderCommand {
        /// Sibling that should end up immediately before the item
        pub before_id: Option<i64>,
        /// Sibling that should end up immediately after the item
        pub after_id: Option<i64>,
    }
}
