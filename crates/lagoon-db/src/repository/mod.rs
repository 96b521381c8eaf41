//! # Repository Module
//!
//! Database repository implementations for Lagoon POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Repository Pattern Explained                       │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean   │
//! │  API. The settlement engine never writes SQL.                       │
//! │                                                                     │
//! │  SettlementEngine                                                   │
//! │       │                                                             │
//! │       │  db.sales().find_by_group_code("G-2026-001")                │
//! │       ▼                                                             │
//! │  SalesRepository                                                    │
//! │  ├── insert_document(&mut conn, doc)                                │
//! │  ├── find_by_group_code(&self, code)                                │
//! │  └── update_orders(&mut conn, orders)                               │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Write methods take `&mut SqliteConnection` so the engine can run   │
//! │  a whole settlement operation inside one transaction.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Inventory store: CRUD plus the
//!   conditional stock decrement
//! - [`sales::SalesRepository`] - Order store: documents keyed by group code
//! - [`received_stock::ReceivedStockRepository`] - Stock receipt records
//! - [`report::ReportRepository`] - Read-side aggregations

pub mod product;
pub mod received_stock;
pub mod report;
pub mod sales;
