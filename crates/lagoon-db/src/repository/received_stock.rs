//! # Received Stock Repository
//!
//! Database operations for stock-receipt records.
//!
//! Creating a receipt and incrementing the product's stock belong to one
//! transaction; the settlement engine passes the same connection to this
//! repository and to [`crate::repository::product::ProductRepository::increment_stock`].

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lagoon_core::ReceivedStock;

#[derive(Debug, FromRow)]
struct ReceivedStockRow {
    id: String,
    received_product_id: String,
    received_product_name: String,
    category: String,
    qty: i64,
    remark: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReceivedStockRow> for ReceivedStock {
    fn from(row: ReceivedStockRow) -> Self {
        ReceivedStock {
            id: row.id,
            received_product_id: row.received_product_id,
            received_product_name: row.received_product_name,
            category: row.category,
            qty: row.qty,
            remark: row.remark,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const RECEIVED_COLUMNS: &str = "id, received_product_id, received_product_name, category, \
     qty, remark, created_by, created_at, updated_at";

/// Repository for received-stock records.
#[derive(Debug, Clone)]
pub struct ReceivedStockRepository {
    pool: SqlitePool,
}

impl ReceivedStockRepository {
    /// Creates a new ReceivedStockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceivedStockRepository { pool }
    }

    /// Inserts a receipt record on the caller's connection.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        record: &ReceivedStock,
    ) -> DbResult<()> {
        debug!(
            product_id = %record.received_product_id,
            qty = record.qty,
            "Inserting received stock"
        );

        sqlx::query(
            r#"
            INSERT INTO received_stocks (
                id, received_product_id, received_product_name, category,
                qty, remark, created_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.received_product_id)
        .bind(&record.received_product_name)
        .bind(&record.category)
        .bind(record.qty)
        .bind(&record.remark)
        .bind(&record.created_by)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Gets a receipt record by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ReceivedStock>> {
        let sql = format!("SELECT {RECEIVED_COLUMNS} FROM received_stocks WHERE id = ?1");
        let row: Option<ReceivedStockRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ReceivedStock::from))
    }

    /// Paginated listing of receipt records, newest first.
    pub async fn list(&self, limit: u32, offset: u32) -> DbResult<Vec<ReceivedStock>> {
        let sql = format!(
            "SELECT {RECEIVED_COLUMNS} FROM received_stocks \
             ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
        );
        let rows: Vec<ReceivedStockRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ReceivedStock::from).collect())
    }

    /// Updates the remark of a receipt record.
    pub async fn update_remark(&self, id: &str, remark: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE received_stocks SET remark = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(remark)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ReceivedStock", id));
        }

        Ok(())
    }

    /// Deletes a receipt record. The stock increment it caused is kept;
    /// corrections go through a new receipt or a product update.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM received_stocks WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ReceivedStock", id));
        }

        Ok(())
    }
}

/// Generates a new receipt record ID.
pub fn generate_received_stock_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_record(product_id: &str) -> ReceivedStock {
        let now = Utc::now();
        ReceivedStock {
            id: generate_received_stock_id(),
            received_product_id: product_id.to_string(),
            received_product_name: "Snorkel Mask".to_string(),
            category: "DIVE".to_string(),
            qty: 10,
            remark: "Morning delivery".to_string(),
            created_by: "admin".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_list_and_remark() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.received_stocks();

        let record = sample_record("p1");
        let mut tx = db.begin().await.unwrap();
        repo.insert(&mut tx, &record).await.unwrap();
        tx.commit().await.unwrap();

        let listed = repo.list(10, 0).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].qty, 10);

        repo.update_remark(&record.id, "Corrected count").await.unwrap();
        let found = repo.get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found.remark, "Corrected count");

        repo.delete(&record.id).await.unwrap();
        assert!(repo.get_by_id(&record.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&record.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
