//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> BooksResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(BooksError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a quantity or rate used on an invoice line is positive
pub fn validate_positive_quantity(quantity: &BigDecimal, what: &str) -> BooksResult<()> {
    if *quantity <= BigDecimal::from(0) {
        Err(BooksError::Validation(format!("{what} must be positive")))
    } else {
        Ok(())
    }
}

/// Validate that a ledger name is valid
pub fn validate_ledger_name(name: &str) -> BooksResult<()> {
    if name.trim().is_empty() {
        return Err(BooksError::Validation(
            "Ledger name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(BooksError::Validation(
            "Ledger name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a voucher narration is within bounds
pub fn validate_narration(narration: &str) -> BooksResult<()> {
    if narration.len() > 500 {
        return Err(BooksError::Validation(
            "Narration cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced voucher validator with detailed checks
pub struct EnhancedVoucherValidator;

impl VoucherValidator for EnhancedVoucherValidator {
    fn validate_voucher(&self, voucher: &Voucher) -> BooksResult<()> {
        // Basic double-entry validation
        voucher.validate()?;

        validate_narration(&voucher.narration)?;

        for entry in &voucher.entries {
            validate_positive_amount(&entry.amount)?;
        }

        // Same ledger must not appear twice on the same side of a voucher
        let mut seen = std::collections::HashSet::new();
        for entry in &voucher.entries {
            let combination = (&entry.ledger_id, &entry.entry_type);
            if !seen.insert(combination) {
                return Err(BooksError::Validation(format!(
                    "Ledger '{}' appears multiple times with the same entry type in voucher",
                    entry.ledger_name
                )));
            }
        }

        Ok(())
    }
}

/// Enhanced ledger validator with detailed checks
pub struct EnhancedLedgerValidator;

impl LedgerValidator for EnhancedLedgerValidator {
    fn validate_ledger(&self, ledger: &Ledger) -> BooksResult<()> {
        validate_ledger_name(&ledger.name)?;
        Ok(())
    }

    fn validate_ledger_deletion(&self, _ledger_id: &str) -> BooksResult<()> {
        // Deletion stays permissive even in the enhanced validator; see the
        // registry docs for how dangling references degrade.
        Ok(())
    }
}
