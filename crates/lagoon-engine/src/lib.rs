//! # lagoon-engine: Order Settlement Engine
//!
//! The single place in Lagoon POS where correctness actually matters:
//! stock never goes negative, and money is conserved across a split.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Lagoon POS Settlement Flow                         │
//! │                                                                     │
//! │  Caller (API layer, supplies bearer-token identity)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │              ★ lagoon-engine (THIS CRATE) ★                   │ │
//! │  │                                                               │ │
//! │  │  create_order     validate → decrement stock → insert doc    │ │
//! │  │                   (one transaction, all-or-nothing)           │ │
//! │  │  recalculate      group lock → commission math → pool split  │ │
//! │  │                   → save all orders (one transaction)         │ │
//! │  │  reduce_price     group lock → first match → floor at zero   │ │
//! │  │  receive_stock    insert receipt + increment stock            │ │
//! │  └───────────────┬──────────────────────────┬────────────────────┘ │
//! │                  │                          │                      │
//! │                  ▼                          ▼                      │
//! │           lagoon-core                  lagoon-db                   │
//! │           (pure math)                  (SQLite)                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The [`SettlementEngine`] and its operations
//! - [`requests`] - Request and outcome types
//! - [`lock`] - Per-group-code serialization
//! - [`error`] - Coded errors surfaced to callers

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod lock;
pub mod requests;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::SettlementEngine;
pub use error::{EngineError, EngineResult, ErrorCode};
pub use requests::{
    CreateOrderRequest, LineRequest, PriceReduction, ReceiveStockRequest, RecalculationOutcome,
};
