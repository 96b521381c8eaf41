//! # Engine Error Type
//!
//! The coded error callers of the settlement engine see.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Error Flow in Lagoon POS                          │
//! │                                                                     │
//! │  ValidationError ──┐                                                │
//! │                    ├── CoreError ──┐                                │
//! │  OutOfStock ───────┘               ├── EngineError ───► caller      │
//! │                                    │                                │
//! │  sqlx::Error ───── DbError ────────┘                                │
//! │                                                                     │
//! │  Every distinct caller-visible outcome (ValidationError,            │
//! │  OutOfStock, NotFound, InvalidInput, StorageFailure) maps to a      │
//! │  distinct machine-readable code. None are silently swallowed.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use lagoon_core::{CoreError, ValidationError};
use lagoon_db::DbError;

/// Machine-readable error codes for caller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Group code or order code has no matching record (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Non-positive or otherwise unusable amount (400)
    InvalidInput,

    /// Requested quantity exceeds current stock (409)
    OutOfStock,

    /// Underlying store unavailable or query failed (500)
    DatabaseError,

    /// Internal engine error (500)
    Internal,
}

/// Settlement operation errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Group code, order code, or product has no matching record.
    #[error("{0}")]
    NotFound(String),

    /// Input validation failed before any business logic ran.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Caller-supplied amount is not usable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A line item requested more than the available stock. The whole
    /// order was rejected; no stock changed.
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    OutOfStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// The storage layer failed; the operation's transaction rolled back.
    #[error("Storage failure: {0}")]
    Database(DbError),
}

impl EngineError {
    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::NotFound(_) => ErrorCode::NotFound,
            EngineError::Validation(_) => ErrorCode::ValidationError,
            EngineError::InvalidInput(_) => ErrorCode::InvalidInput,
            EngineError::OutOfStock { .. } => ErrorCode::OutOfStock,
            EngineError::Database(DbError::Internal(_)) => ErrorCode::Internal,
            EngineError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                EngineError::NotFound(format!("Product not found: {id}"))
            }
            CoreError::GroupNotFound(code) => {
                EngineError::NotFound(format!("Sales record not found with group code: {code}"))
            }
            CoreError::OrderNotFound {
                group_code,
                order_code,
            } => EngineError::NotFound(format!(
                "Order {order_code} not found in group {group_code}"
            )),
            CoreError::OutOfStock {
                item,
                available,
                requested,
            } => EngineError::OutOfStock {
                item,
                available,
                requested,
            },
            CoreError::InvalidInput(msg) => EngineError::InvalidInput(msg),
            CoreError::Validation(e) => EngineError::Validation(e),
        }
    }
}

impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                EngineError::NotFound(format!("{entity} not found: {id}"))
            }
            other => EngineError::Database(other),
        }
    }
}

/// Result type for settlement operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_per_outcome() {
        assert_eq!(
            EngineError::NotFound("x".into()).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            EngineError::InvalidInput("x".into()).code(),
            ErrorCode::InvalidInput
        );
        assert_eq!(
            EngineError::OutOfStock {
                item: "Mask".into(),
                available: 2,
                requested: 3
            }
            .code(),
            ErrorCode::OutOfStock
        );
        assert_eq!(
            EngineError::Database(DbError::PoolExhausted).code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let err: EngineError = CoreError::OutOfStock {
            item: "Mask".into(),
            available: 2,
            requested: 3,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::OutOfStock);

        let err: EngineError = CoreError::GroupNotFound("G-1".into()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            err.to_string(),
            "Sales record not found with group code: G-1"
        );
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: EngineError = DbError::not_found("Order", "o-1").into();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_codes_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::OutOfStock).unwrap(),
            "\"OUT_OF_STOCK\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::ValidationError).unwrap(),
            "\"VALIDATION_ERROR\""
        );
    }
}
