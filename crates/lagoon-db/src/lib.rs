//! # lagoon-db: Database Layer for Lagoon POS
//!
//! This crate provides database access for the Lagoon POS settlement
//! engine. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Lagoon POS Data Flow                           │
//! │                                                                     │
//! │  SettlementEngine (create_order, recalculate, reduce_price)         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                   lagoon-db (THIS CRATE)                      │ │
//! │  │                                                               │ │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐  │ │
//! │  │   │   Database    │   │  Repositories  │   │  Migrations  │  │ │
//! │  │   │   (pool.rs)   │   │                │   │  (embedded)  │  │ │
//! │  │   │               │   │ ProductRepo    │   │              │  │ │
//! │  │   │ SqlitePool    │◄──│ SalesRepo      │   │ 001_init.sql │  │ │
//! │  │   │ Transactions  │   │ ReceivedStock  │   │ ...          │  │ │
//! │  │   │               │   │ ReportRepo     │   │              │  │ │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘  │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │       │                                                             │
//! │       ▼                                                             │
//! │                      SQLite Database (WAL)                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sales, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lagoon_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/lagoon.db")).await?;
//!
//! // Use repositories
//! let product = db.products().get_by_item_code("MASK-01").await?;
//! let group = db.sales().find_by_group_code("G-2026-001").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::received_stock::ReceivedStockRepository;
pub use repository::report::ReportRepository;
pub use repository::sales::{GroupFilter, GroupSummary, SalesRepository};
