//! # Validation Module
//!
//! Input validation for settlement requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Engine entry point                                        │
//! │  └── THIS MODULE: required fields, formats, ranges                  │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Business rules                                            │
//! │  └── Stock checks, group/order existence                            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL, UNIQUE, CHECK (stock >= 0), foreign keys             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::OrderLine;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Code Validators
// =============================================================================

fn validate_code(field: &str, code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a group code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Alphanumeric plus hyphens and underscores
pub fn validate_group_code(code: &str) -> ValidationResult<()> {
    validate_code("group_code", code)
}

/// Validates an order code. Same shape rules as group codes.
pub fn validate_order_code(code: &str) -> ValidationResult<()> {
    validate_code("order_code", code)
}

/// Validates the demonstrator name attached to a new order.
///
/// Caller-supplied, required, bounded length.
pub fn validate_demonstrator_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "demonstrator_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "demonstrator_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Order Line Validators
// =============================================================================

/// Validates the product lines of a new order.
///
/// ## Rules
/// - At least one line
/// - At most MAX_ORDER_LINES lines
/// - Every quantity positive and at most MAX_LINE_QUANTITY
pub fn validate_order_lines(lines: &[OrderLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "selected_products".to_string(),
        });
    }

    if lines.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "selected_products".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    for line in lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }
        if line.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        if line.quantity > MAX_LINE_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_LINE_QUANTITY,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a price-reduction amount.
///
/// ## Rules
/// - Must be strictly positive; reducing by zero is rejected
pub fn validate_reduction_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount_to_reduce".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (fully discounted orders).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: i64) -> OrderLine {
        OrderLine {
            product_id: product_id.to_string(),
            product_name: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_validate_group_code() {
        assert!(validate_group_code("G-2024-001").is_ok());
        assert!(validate_group_code("TOUR_7").is_ok());

        assert!(validate_group_code("").is_err());
        assert!(validate_group_code("   ").is_err());
        assert!(validate_group_code("has space").is_err());
        assert!(validate_group_code(&"G".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_demonstrator_name() {
        assert!(validate_demonstrator_name("Ruwan Perera").is_ok());
        assert!(validate_demonstrator_name("").is_err());
        assert!(validate_demonstrator_name("   ").is_err());
        assert!(validate_demonstrator_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_order_lines() {
        assert!(validate_order_lines(&[line("p1", 2)]).is_ok());

        assert!(validate_order_lines(&[]).is_err());
        assert!(validate_order_lines(&[line("p1", 0)]).is_err());
        assert!(validate_order_lines(&[line("p1", -3)]).is_err());
        assert!(validate_order_lines(&[line("", 1)]).is_err());
        assert!(validate_order_lines(&[line("p1", 1000)]).is_err());
    }

    #[test]
    fn test_validate_reduction_amount() {
        assert!(validate_reduction_amount(Money::from_cents(1)).is_ok());
        assert!(validate_reduction_amount(Money::zero()).is_err());
        assert!(validate_reduction_amount(Money::from_cents(-5)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }
}
