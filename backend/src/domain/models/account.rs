//! Domain model for a money account owned by a kid.
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub kid_id: i64,
    pub name: String,
    /// No floor or ceiling is enforced; negative balances are legal
    pub balance: f64,
    pub sort_order: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceOperation {
    Add,
    Remove,
}

impl BalanceOperation {
    /// The signed delta this operation applies for a positive amount
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            Self::Add => amount,
            Self::Remove => -amount,
        }
    }
}

impl FromStr for BalanceOperation {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(DomainError::validation(format!(
                "Operation must be 'add' or 'remove', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BalanceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}
