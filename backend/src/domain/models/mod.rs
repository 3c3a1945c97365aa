pub mod account;
pub mod full_ledger;
pub mod kid;
pub mod ledger;

pub use account::{Account, BalanceOperation};
pub use full_ledger::{FullLedger, KidWithAccounts};
pub use kid::Kid;
pub use ledger::Ledger;
