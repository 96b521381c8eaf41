//! # lagoon-core: Pure Business Logic for Lagoon POS
//!
//! This crate is the **heart** of Lagoon POS. It contains the settlement
//! math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Lagoon POS Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 lagoon-engine (settlement)                    │ │
//! │  │   create_order, recalculate, reduce_price, receive_stock      │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │               ★ lagoon-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │  ┌────────┐ ┌────────┐ ┌────────────┐ ┌────────────────────┐ │ │
//! │  │  │ types  │ │ money  │ │ commission │ │  redistribution    │ │ │
//! │  │  └────────┘ └────────┘ └────────────┘ └────────────────────┘ │ │
//! │  │                                                               │ │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                 lagoon-db (Database Layer)                    │ │
//! │  │           SQLite queries, migrations, repositories            │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SalesDocument, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`commission`] - Per-order commission recalculation
//! - [`redistribution`] - Proportional deduction-pool redistribution
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod money;
pub mod redistribution;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{apply_commissions, CommissionOutcome, RecalculateRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use redistribution::{redistribute, Redistribution};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum product lines allowed on a single order.
///
/// ## Business Reason
/// Prevents runaway orders and keeps one settlement transaction bounded.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
