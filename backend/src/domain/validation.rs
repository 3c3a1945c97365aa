//! Boundary validation for every caller-supplied field.
//!
//! All checks run before the first store round trip. Each function returns
//! the cleaned value the rest of the core is allowed to trust.

use super::errors::{DomainError, DomainResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMOJI_LENGTH: usize = 16;

/// Validate a ledger, kid or account name. Returns the trimmed name.
pub fn validate_name(field: &str, name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a kid's display emoji. Returns the trimmed token.
pub fn validate_emoji(emoji: &str) -> DomainResult<String> {
    let trimmed = emoji.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Emoji cannot be empty"));
    }
    if trimmed.chars().count() > MAX_EMOJI_LENGTH {
        return Err(DomainError::validation(format!(
            "Emoji cannot exceed {} characters",
            MAX_EMOJI_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Amounts moved in or out of an account must be finite and strictly positive
pub fn validate_amount(amount: f64) -> DomainResult<f64> {
    if !amount.is_finite() {
        return Err(DomainError::validation("Amount must be a finite number"));
    }
    if amount <= 0.0 {
        return Err(DomainError::validation("Amount must be greater than 0"));
    }
    Ok(amount)
}

/// Starting balances may be any finite value, including negative ones
pub fn validate_balance(balance: f64) -> DomainResult<f64> {
    if !balance.is_finite() {
        return Err(DomainError::validation("Balance must be a finite number"));
    }
    Ok(balance)
}
