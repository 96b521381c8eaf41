//! # Sales Repository
//!
//! Database operations for sales documents and their orders: the
//! engine's order store.
//!
//! ## Group = Every Document Sharing a group_code
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Cross-Document Group Aggregate                     │
//! │                                                                     │
//! │  create_order("G-2026-001", ...)  →  sales_documents row #1         │
//! │  create_order("G-2026-001", ...)  →  sales_documents row #2         │
//! │                                                                     │
//! │  find_by_group_code("G-2026-001") returns BOTH documents, each      │
//! │  with fully hydrated orders, boatmen, and lines, in insertion       │
//! │  order. Settlement always operates on the whole group and saves     │
//! │  all touched orders in one transaction.                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lagoon_core::{
    BoatmanShare, CompanySplit, DiscountSplit, GuideSplit, Order, OrderLine, SalesDocument,
};

// =============================================================================
// Row Shapes
// =============================================================================

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    group_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    order_code: String,
    price_cents: i64,
    item_wise_total_cents: i64,
    category_code: String,
    exotic: bool,
    less_cents: i64,
    gift_cents: i64,
    demonstrator_name: String,
    guide_name: String,
    guide_rate_bps: u32,
    guide_amount_cents: i64,
    company_rate_bps: u32,
    company_amount_cents: i64,
    discount_rate_bps: u32,
    discount_amount_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct BoatmanRow {
    name: String,
    rate_bps: u32,
    cost_amount_cents: i64,
}

#[derive(Debug, FromRow)]
struct LineRow {
    product_id: String,
    product_name: String,
    quantity: i64,
}

/// Summary row for the paginated group listing.
#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct GroupSummary {
    pub group_code: String,
    pub document_count: i64,
    pub order_count: i64,
    pub total_sales_cents: i64,
    pub first_created_at: DateTime<Utc>,
}

/// Optional filters for the group listing. The default (all `None`)
/// lists every group.
#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
    /// Inclusive lower bound on document creation time.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on document creation time.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on the group code.
    pub group_code: Option<String>,
    /// Case-insensitive substring match on a boatman name; only orders
    /// with a matching boatman count toward the listed groups.
    pub boatman_name: Option<String>,
}

// =============================================================================
// Sales Repository
// =============================================================================

/// Repository for sales document operations.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    /// Creates a new SalesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalesRepository { pool }
    }

    /// Inserts a document together with its orders, boatmen, and lines.
    ///
    /// Runs on the caller's connection so the insert shares a transaction
    /// with the stock decrements of the same `create_order` call.
    pub async fn insert_document(
        &self,
        conn: &mut SqliteConnection,
        doc: &SalesDocument,
    ) -> DbResult<()> {
        debug!(id = %doc.id, group_code = %doc.group_code, "Inserting sales document");

        sqlx::query(
            r#"
            INSERT INTO sales_documents (id, group_code, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&doc.id)
        .bind(&doc.group_code)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&mut *conn)
        .await?;

        for (position, order) in doc.orders.iter().enumerate() {
            self.insert_order(conn, &doc.id, position as i64, order)
                .await?;
        }

        Ok(())
    }

    async fn insert_order(
        &self,
        conn: &mut SqliteConnection,
        document_id: &str,
        position: i64,
        order: &Order,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, document_id, position, order_code,
                price_cents, item_wise_total_cents, category_code, exotic,
                less_cents, gift_cents, demonstrator_name,
                guide_name, guide_rate_bps, guide_amount_cents,
                company_rate_bps, company_amount_cents,
                discount_rate_bps, discount_amount_cents,
                created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14,
                ?15, ?16,
                ?17, ?18,
                ?19
            )
            "#,
        )
        .bind(&order.id)
        .bind(document_id)
        .bind(position)
        .bind(&order.order_code)
        .bind(order.price_cents)
        .bind(order.item_wise_total_cents)
        .bind(&order.category_code)
        .bind(order.exotic)
        .bind(order.less_cents)
        .bind(order.gift_cents)
        .bind(&order.demonstrator_name)
        .bind(&order.guide.name)
        .bind(order.guide.rate_bps)
        .bind(order.guide.amount_cents)
        .bind(order.company.rate_bps)
        .bind(order.company.amount_cents)
        .bind(order.discount.rate_bps)
        .bind(order.discount.amount_cents)
        .bind(order.created_at)
        .execute(&mut *conn)
        .await?;

        for (position, boatman) in order.boatmen.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_boatmen (id, order_id, position, name, rate_bps, cost_amount_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order.id)
            .bind(position as i64)
            .bind(&boatman.name)
            .bind(boatman.rate_bps)
            .bind(boatman.cost_amount_cents)
            .execute(&mut *conn)
            .await?;
        }

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines (id, order_id, position, product_id, product_name, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order.id)
            .bind(position as i64)
            .bind(&line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Finds every document sharing a group code, fully hydrated.
    ///
    /// Documents come back in creation order and orders in insertion
    /// order (the `position` column), so pool redistribution reconciles
    /// its rounding residual onto a stable "last" order.
    pub async fn find_by_group_code(&self, group_code: &str) -> DbResult<Vec<SalesDocument>> {
        let doc_rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, group_code, created_at, updated_at
            FROM sales_documents
            WHERE group_code = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(group_code)
        .fetch_all(&self.pool)
        .await?;

        let mut documents = Vec::with_capacity(doc_rows.len());
        for doc_row in doc_rows {
            let orders = self.load_orders(&doc_row.id).await?;
            documents.push(SalesDocument {
                id: doc_row.id,
                group_code: doc_row.group_code,
                orders,
                created_at: doc_row.created_at,
                updated_at: doc_row.updated_at,
            });
        }

        debug!(
            group_code = %group_code,
            documents = documents.len(),
            "Loaded group"
        );
        Ok(documents)
    }

    async fn load_orders(&self, document_id: &str) -> DbResult<Vec<Order>> {
        let order_rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_code,
                   price_cents, item_wise_total_cents, category_code, exotic,
                   less_cents, gift_cents, demonstrator_name,
                   guide_name, guide_rate_bps, guide_amount_cents,
                   company_rate_bps, company_amount_cents,
                   discount_rate_bps, discount_amount_cents,
                   created_at
            FROM orders
            WHERE document_id = ?1
            ORDER BY position
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(order_rows.len());
        for row in order_rows {
            let boatman_rows: Vec<BoatmanRow> = sqlx::query_as(
                r#"
                SELECT name, rate_bps, cost_amount_cents
                FROM order_boatmen
                WHERE order_id = ?1
                ORDER BY position
                "#,
            )
            .bind(&row.id)
            .fetch_all(&self.pool)
            .await?;

            let line_rows: Vec<LineRow> = sqlx::query_as(
                r#"
                SELECT product_id, product_name, quantity
                FROM order_lines
                WHERE order_id = ?1
                ORDER BY position
                "#,
            )
            .bind(&row.id)
            .fetch_all(&self.pool)
            .await?;

            orders.push(Order {
                id: row.id,
                order_code: row.order_code,
                guide: GuideSplit {
                    name: row.guide_name,
                    rate_bps: row.guide_rate_bps,
                    amount_cents: row.guide_amount_cents,
                },
                company: CompanySplit {
                    rate_bps: row.company_rate_bps,
                    amount_cents: row.company_amount_cents,
                },
                discount: DiscountSplit {
                    rate_bps: row.discount_rate_bps,
                    amount_cents: row.discount_amount_cents,
                },
                boatmen: boatman_rows
                    .into_iter()
                    .map(|b| BoatmanShare {
                        name: b.name,
                        rate_bps: b.rate_bps,
                        cost_amount_cents: b.cost_amount_cents,
                    })
                    .collect(),
                lines: line_rows
                    .into_iter()
                    .map(|l| OrderLine {
                        product_id: l.product_id,
                        product_name: l.product_name,
                        quantity: l.quantity,
                    })
                    .collect(),
                price_cents: row.price_cents,
                item_wise_total_cents: row.item_wise_total_cents,
                category_code: row.category_code,
                exotic: row.exotic,
                less_cents: row.less_cents,
                gift_cents: row.gift_cents,
                demonstrator_name: row.demonstrator_name,
                created_at: row.created_at,
            });
        }

        Ok(orders)
    }

    /// Persists the recalculated splits and pool shares of the given
    /// orders. The caller owns the transaction: either every order across
    /// every document lands, or none do.
    pub async fn update_orders(
        &self,
        conn: &mut SqliteConnection,
        orders: &[Order],
    ) -> DbResult<()> {
        for order in orders {
            let result = sqlx::query(
                r#"
                UPDATE orders SET
                    less_cents = ?2,
                    gift_cents = ?3,
                    guide_rate_bps = ?4,
                    guide_amount_cents = ?5,
                    company_rate_bps = ?6,
                    company_amount_cents = ?7,
                    discount_rate_bps = ?8,
                    discount_amount_cents = ?9
                WHERE id = ?1
                "#,
            )
            .bind(&order.id)
            .bind(order.less_cents)
            .bind(order.gift_cents)
            .bind(order.guide.rate_bps)
            .bind(order.guide.amount_cents)
            .bind(order.company.rate_bps)
            .bind(order.company.amount_cents)
            .bind(order.discount.rate_bps)
            .bind(order.discount.amount_cents)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("Order", &order.id));
            }

            for (position, boatman) in order.boatmen.iter().enumerate() {
                sqlx::query(
                    r#"
                    UPDATE order_boatmen SET
                        rate_bps = ?3,
                        cost_amount_cents = ?4
                    WHERE order_id = ?1 AND position = ?2
                    "#,
                )
                .bind(&order.id)
                .bind(position as i64)
                .bind(boatman.rate_bps)
                .bind(boatman.cost_amount_cents)
                .execute(&mut *conn)
                .await?;
            }
        }

        Ok(())
    }

    /// Updates the price of one order and touches its document.
    pub async fn update_order_price(
        &self,
        conn: &mut SqliteConnection,
        document_id: &str,
        order_id: &str,
        new_price_cents: i64,
    ) -> DbResult<()> {
        debug!(order_id = %order_id, new_price_cents, "Updating order price");

        let result = sqlx::query("UPDATE orders SET price_cents = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(new_price_cents)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        let now = Utc::now();
        sqlx::query("UPDATE sales_documents SET updated_at = ?2 WHERE id = ?1")
            .bind(document_id)
            .bind(now)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Touches the `updated_at` of every document in a group after a
    /// group-wide recalculation.
    pub async fn touch_group(
        &self,
        conn: &mut SqliteConnection,
        group_code: &str,
    ) -> DbResult<()> {
        let now = Utc::now();
        sqlx::query("UPDATE sales_documents SET updated_at = ?2 WHERE group_code = ?1")
            .bind(group_code)
            .bind(now)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Paginated listing of groups, newest first, optionally filtered by
    /// creation time, group code, or boatman name.
    ///
    /// The date bounds are half-open (`from <= created_at < to`). Code
    /// and name filters are case-insensitive substring matches; the
    /// boatman filter drops orders without a matching boatman from the
    /// summary counts, so a group disappears entirely when none of its
    /// orders match.
    pub async fn fetch_groups(
        &self,
        filter: &GroupFilter,
        limit: u32,
        offset: u32,
    ) -> DbResult<Vec<GroupSummary>> {
        let rows: Vec<GroupSummary> = sqlx::query_as(
            r#"
            SELECT d.group_code,
                   COUNT(DISTINCT d.id) AS document_count,
                   COUNT(o.id) AS order_count,
                   COALESCE(SUM(o.price_cents), 0) AS total_sales_cents,
                   MIN(d.created_at) AS first_created_at
            FROM sales_documents d
            LEFT JOIN orders o ON o.document_id = d.id
            WHERE (?1 IS NULL OR d.created_at >= ?1)
              AND (?2 IS NULL OR d.created_at < ?2)
              AND (?3 IS NULL OR d.group_code LIKE '%' || ?3 || '%')
              AND (?4 IS NULL OR EXISTS (
                    SELECT 1 FROM order_boatmen b
                    WHERE b.order_id = o.id
                      AND b.name LIKE '%' || ?4 || '%'
                  ))
            GROUP BY d.group_code
            ORDER BY first_created_at DESC
            LIMIT ?5 OFFSET ?6
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.group_code.as_deref())
        .bind(filter.boatman_name.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Generates a new document ID.
pub fn generate_document_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_order(order_code: &str, price_cents: i64, less_cents: i64) -> Order {
        Order {
            id: generate_order_id(),
            order_code: order_code.to_string(),
            guide: GuideSplit {
                name: "Nimal".to_string(),
                rate_bps: 1500,
                amount_cents: 0,
            },
            company: CompanySplit {
                rate_bps: 1000,
                amount_cents: 0,
            },
            discount: DiscountSplit {
                rate_bps: 0,
                amount_cents: 0,
            },
            boatmen: vec![BoatmanShare {
                name: "Sunil".to_string(),
                rate_bps: 800,
                cost_amount_cents: 0,
            }],
            lines: vec![OrderLine {
                product_id: "p1".to_string(),
                product_name: "Snorkel Mask".to_string(),
                quantity: 2,
            }],
            price_cents,
            item_wise_total_cents: price_cents,
            category_code: "DIVE".to_string(),
            exotic: false,
            less_cents,
            gift_cents: 0,
            demonstrator_name: "Ruwan".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_document(group_code: &str, orders: Vec<Order>) -> SalesDocument {
        let now = Utc::now();
        SalesDocument {
            id: generate_document_id(),
            group_code: group_code.to_string(),
            orders,
            created_at: now,
            updated_at: now,
        }
    }

    async fn insert_product_for_lines(db: &Database) {
        let now = Utc::now();
        db.products()
            .insert(&lagoon_core::Product {
                id: "p1".to_string(),
                item_code: "MASK-01".to_string(),
                item_name: "Snorkel Mask".to_string(),
                brand_name: "DeepSee".to_string(),
                category_code: "DIVE".to_string(),
                price_cents: 45_000,
                stock: 100,
                is_active: true,
                updated_by: "test".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_document_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        let doc = sample_document("G-1", vec![sample_order("ORD-1", 10_000, 40)]);
        let mut tx = db.begin().await.unwrap();
        repo.insert_document(&mut tx, &doc).await.unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_group_code("G-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].orders.len(), 1);

        let order = &found[0].orders[0];
        assert_eq!(order.order_code, "ORD-1");
        assert_eq!(order.price_cents, 10_000);
        assert_eq!(order.less_cents, 40);
        assert_eq!(order.boatmen.len(), 1);
        assert_eq!(order.boatmen[0].name, "Sunil");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].product_name, "Snorkel Mask");
    }

    #[tokio::test]
    async fn test_group_spans_documents() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        for (code, less) in [("ORD-1", 40), ("ORD-2", 60)] {
            let doc = sample_document("G-1", vec![sample_order(code, 10_000, less)]);
            let mut tx = db.begin().await.unwrap();
            repo.insert_document(&mut tx, &doc).await.unwrap();
            tx.commit().await.unwrap();
        }

        let found = repo.find_by_group_code("G-1").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(repo.find_by_group_code("G-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_orders_persists_splits_and_pools() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        let doc = sample_document("G-1", vec![sample_order("ORD-1", 10_000, 40)]);
        let mut tx = db.begin().await.unwrap();
        repo.insert_document(&mut tx, &doc).await.unwrap();
        tx.commit().await.unwrap();

        let mut documents = repo.find_by_group_code("G-1").await.unwrap();
        let order = &mut documents[0].orders[0];
        order.less_cents = 28;
        order.guide.amount_cents = 1500;
        order.boatmen[0].cost_amount_cents = 800;

        let mut tx = db.begin().await.unwrap();
        repo.update_orders(&mut tx, &documents[0].orders).await.unwrap();
        tx.commit().await.unwrap();

        let reloaded = repo.find_by_group_code("G-1").await.unwrap();
        assert_eq!(reloaded[0].orders[0].less_cents, 28);
        assert_eq!(reloaded[0].orders[0].guide.amount_cents, 1500);
        assert_eq!(reloaded[0].orders[0].boatmen[0].cost_amount_cents, 800);
    }

    #[tokio::test]
    async fn test_fetch_groups_summary() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        for group in ["G-1", "G-1", "G-2"] {
            let doc = sample_document(group, vec![sample_order("ORD", 5_000, 0)]);
            let mut tx = db.begin().await.unwrap();
            repo.insert_document(&mut tx, &doc).await.unwrap();
            tx.commit().await.unwrap();
        }

        let groups = repo.fetch_groups(&GroupFilter::default(), 10, 0).await.unwrap();
        assert_eq!(groups.len(), 2);
        let g1 = groups.iter().find(|g| g.group_code == "G-1").unwrap();
        assert_eq!(g1.document_count, 2);
        assert_eq!(g1.order_count, 2);
        assert_eq!(g1.total_sales_cents, 10_000);
    }

    #[tokio::test]
    async fn test_fetch_groups_filters_by_group_code() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        for group in ["G-ALPHA-1", "G-BETA-1"] {
            let doc = sample_document(group, vec![sample_order("ORD", 5_000, 0)]);
            let mut tx = db.begin().await.unwrap();
            repo.insert_document(&mut tx, &doc).await.unwrap();
            tx.commit().await.unwrap();
        }

        // Substring match, case-insensitive.
        let filter = GroupFilter {
            group_code: Some("alpha".to_string()),
            ..GroupFilter::default()
        };
        let groups = repo.fetch_groups(&filter, 10, 0).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_code, "G-ALPHA-1");

        let filter = GroupFilter {
            group_code: Some("G-".to_string()),
            ..GroupFilter::default()
        };
        assert_eq!(repo.fetch_groups(&filter, 10, 0).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_groups_filters_by_boatman_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        let with_sunil = sample_order("ORD-1", 5_000, 0);
        let mut with_kamal = sample_order("ORD-2", 7_000, 0);
        with_kamal.boatmen[0].name = "Kamal".to_string();

        for (group, order) in [("G-1", with_sunil), ("G-2", with_kamal)] {
            let doc = sample_document(group, vec![order]);
            let mut tx = db.begin().await.unwrap();
            repo.insert_document(&mut tx, &doc).await.unwrap();
            tx.commit().await.unwrap();
        }

        let filter = GroupFilter {
            boatman_name: Some("kam".to_string()),
            ..GroupFilter::default()
        };
        let groups = repo.fetch_groups(&filter, 10, 0).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_code, "G-2");
        assert_eq!(groups[0].order_count, 1);

        // No boatman matches: nothing listed.
        let filter = GroupFilter {
            boatman_name: Some("nobody".to_string()),
            ..GroupFilter::default()
        };
        assert!(repo.fetch_groups(&filter, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_groups_filters_by_date_range() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_product_for_lines(&db).await;
        let repo = db.sales();

        let old_day = Utc::now() - chrono::Duration::days(30);
        let mut old_doc = sample_document("G-OLD", vec![sample_order("ORD-1", 5_000, 0)]);
        old_doc.created_at = old_day;
        old_doc.updated_at = old_day;
        let recent_doc = sample_document("G-NEW", vec![sample_order("ORD-2", 5_000, 0)]);

        for doc in [&old_doc, &recent_doc] {
            let mut tx = db.begin().await.unwrap();
            repo.insert_document(&mut tx, doc).await.unwrap();
            tx.commit().await.unwrap();
        }

        // Only documents created in the last week.
        let filter = GroupFilter {
            from: Some(Utc::now() - chrono::Duration::days(7)),
            ..GroupFilter::default()
        };
        let groups = repo.fetch_groups(&filter, 10, 0).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_code, "G-NEW");

        // Upper bound is exclusive: a window ending before now excludes
        // the recent document but keeps the old one.
        let filter = GroupFilter {
            to: Some(Utc::now() - chrono::Duration::days(1)),
            ..GroupFilter::default()
        };
        let groups = repo.fetch_groups(&filter, 10, 0).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_code, "G-OLD");
    }
}
