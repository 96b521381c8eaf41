//! # Product Repository
//!
//! Database operations for products: the engine's inventory store.
//!
//! ## The Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Closing the Oversell Race                          │
//! │                                                                     │
//! │  ❌ WRONG: read-then-write (two concurrent orders both pass)       │
//! │     SELECT stock FROM products WHERE id = ?     -- both read 5     │
//! │     UPDATE products SET stock = 2               -- both "succeed"  │
//! │                                                                     │
//! │  ✅ CORRECT: decrement-if-sufficient, one statement                │
//! │     UPDATE products SET stock = stock - ?qty                       │
//! │     WHERE id = ? AND stock >= ?qty                                 │
//! │                                                                     │
//! │  Zero rows affected means insufficient stock. The schema CHECK     │
//! │  (stock >= 0) stands behind it as a last line of defense.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lagoon_core::Product;

/// Database row shape for products.
///
/// lagoon-core types carry no sqlx derives (the core crate has no I/O
/// dependencies), so each repository maps rows through a local struct.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    item_code: String,
    item_name: String,
    brand_name: String,
    category_code: String,
    price_cents: i64,
    stock: i64,
    is_active: bool,
    updated_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            item_code: row.item_code,
            item_name: row.item_name,
            brand_name: row.brand_name,
            category_code: row.category_code,
            price_cents: row.price_cents,
            stock: row.stock,
            is_active: row.is_active,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, item_code, item_name, brand_name, category_code, \
     price_cents, stock, is_active, updated_by, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_item_code("MASK-01").await?;
/// let all = repo.list_active(50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Gets a product by its ID inside an open transaction.
    ///
    /// Used by the settlement engine on the stock-commit path so the
    /// resolved product name and the decrement live in one transaction.
    pub async fn get_in_tx(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql).bind(id).fetch_optional(conn).await?;

        Ok(row.map(Product::from))
    }

    /// Gets a product by its business item code (e.g. "MASK-01").
    pub async fn get_by_item_code(&self, item_code: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE item_code = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(item_code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lists active products sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 ORDER BY item_name LIMIT ?1"
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Item code already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(item_code = %product.item_code, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, item_code, item_name, brand_name, category_code,
                price_cents, stock, is_active, updated_by,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.item_code)
        .bind(&product.item_name)
        .bind(&product.brand_name)
        .bind(&product.category_code)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(&product.updated_by)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product's catalog fields.
    ///
    /// Stock is deliberately excluded: stock only moves through
    /// [`decrement_stock`](Self::decrement_stock) and
    /// [`increment_stock`](Self::increment_stock).
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                item_code = ?2,
                item_name = ?3,
                brand_name = ?4,
                category_code = ?5,
                price_cents = ?6,
                is_active = ?7,
                updated_by = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.item_code)
        .bind(&product.item_name)
        .bind(&product.brand_name)
        .bind(&product.category_code)
        .bind(product.price_cents)
        .bind(product.is_active)
        .bind(&product.updated_by)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Decrements stock only if sufficient stock remains.
    ///
    /// One conditional UPDATE, so two concurrent orders against the same
    /// product can never both pass the check (see module docs).
    ///
    /// ## Returns
    /// * `Ok(true)` - Stock decremented
    /// * `Ok(false)` - Insufficient stock (or unknown product); nothing changed
    pub async fn decrement_stock(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        qty: i64,
    ) -> DbResult<bool> {
        debug!(id = %id, qty = %qty, "Conditional stock decrement");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock = stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(id)
        .bind(qty)
        .bind(now)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Increments stock (stock receipt).
    pub async fn increment_stock(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        qty: i64,
    ) -> DbResult<()> {
        debug!(id = %id, qty = %qty, "Incrementing stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(qty)
        .bind(now)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// Historical orders still reference the product row.
    pub async fn soft_delete(&self, id: &str, updated_by: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                is_active = 0,
                updated_by = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(updated_by)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
