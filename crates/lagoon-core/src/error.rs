//! # Error Types
//!
//! Domain-specific error types for lagoon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  lagoon-core errors (this file)                                     │
//! │  ├── CoreError        - Settlement rule violations                  │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  lagoon-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  lagoon-engine errors                                               │
//! │  └── EngineError      - What callers see (coded + message)          │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → EngineError → caller           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item code, group code, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Settlement business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found for an order line.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds current stock for a line item.
    ///
    /// Creation is all-or-nothing: when any line reports this, no stock
    /// is altered for the whole order.
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    OutOfStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// No sales document exists for a group code.
    #[error("Sales record not found with group code: {0}")]
    GroupNotFound(String),

    /// No order in the group matches the order code.
    #[error("Order {order_code} not found in group {group_code}")]
    OrderNotFound {
        group_code: String,
        order_code: String,
    },

    /// Caller-supplied amount is not usable (e.g. non-positive reduction).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. disallowed characters in a code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OutOfStock {
            item: "Snorkel Mask".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Snorkel Mask: available 3, requested 5"
        );

        let err = CoreError::GroupNotFound("G-42".to_string());
        assert_eq!(err.to_string(), "Sales record not found with group code: G-42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "demonstrator_name".to_string(),
        };
        assert_eq!(err.to_string(), "demonstrator_name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
