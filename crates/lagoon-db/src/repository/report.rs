//! # Report Repository
//!
//! Read-side revenue aggregations over persisted orders.
//!
//! These are plain grouping queries with no settlement logic: the engine
//! guarantees the figures they sum (splits, pool shares, prices) are
//! consistent before they land.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Reporting Reads                              │
//! │                                                                     │
//! │  monthly_revenue(year)      12 rows: income + order count per month │
//! │  daily_totals(date)         one day: groups, orders, guide cost,    │
//! │                             boatman cost, sales amount              │
//! │  earnings_by_range(a, b)    per-guide / per-boatman earnings,       │
//! │                             sorted by earnings, with totals         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::DbResult;

// =============================================================================
// Report Rows
// =============================================================================

/// One month of the chart-data report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Calendar month, 1-12.
    pub month: u32,
    pub income_cents: i64,
    pub order_count: i64,
}

/// Totals for a single calendar day.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DailyTotals {
    pub group_count: i64,
    pub order_count: i64,
    pub guide_cost_cents: i64,
    pub boatman_cost_cents: i64,
    pub sales_cents: i64,
}

/// Earnings of one guide or boatman over a date range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EarningsRow {
    pub name: String,
    pub earnings_cents: i64,
    pub order_count: i64,
}

/// Date-range earnings report: per-person breakdowns plus summary totals.
#[derive(Debug, Clone, Serialize)]
pub struct EarningsReport {
    pub guides: Vec<EarningsRow>,
    pub boatmen: Vec<EarningsRow>,
    pub total_guide_cents: i64,
    pub total_boatman_cents: i64,
    pub total_sales_cents: i64,
    pub order_count: i64,
}

#[derive(Debug, FromRow)]
struct MonthlyRow {
    month: i64,
    income_cents: i64,
    order_count: i64,
}

// =============================================================================
// Report Repository
// =============================================================================

/// Repository for read-side aggregations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Revenue per month for one calendar year.
    ///
    /// Always returns 12 rows; months without orders report zero.
    pub async fn monthly_revenue(&self, year: i32) -> DbResult<Vec<MonthlyRevenue>> {
        let year_key = format!("{year:04}");

        let rows: Vec<MonthlyRow> = sqlx::query_as(
            r#"
            SELECT CAST(strftime('%m', created_at) AS INTEGER) AS month,
                   COALESCE(SUM(price_cents), 0) AS income_cents,
                   COUNT(*) AS order_count
            FROM orders
            WHERE strftime('%Y', created_at) = ?1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(&year_key)
        .fetch_all(&self.pool)
        .await?;

        let mut months: Vec<MonthlyRevenue> = (1..=12)
            .map(|month| MonthlyRevenue {
                month,
                income_cents: 0,
                order_count: 0,
            })
            .collect();
        for row in rows {
            if let Some(slot) = months.get_mut(row.month as usize - 1) {
                slot.income_cents = row.income_cents;
                slot.order_count = row.order_count;
            }
        }

        Ok(months)
    }

    /// Totals for one calendar day (UTC).
    pub async fn daily_totals(&self, date: NaiveDate) -> DbResult<DailyTotals> {
        let day_key = date.to_string();

        let totals: DailyTotals = sqlx::query_as(
            r#"
            SELECT COUNT(DISTINCT d.group_code) AS group_count,
                   COUNT(o.id) AS order_count,
                   COALESCE(SUM(o.guide_amount_cents), 0) AS guide_cost_cents,
                   COALESCE((
                       SELECT SUM(b.cost_amount_cents)
                       FROM order_boatmen b
                       JOIN orders ob ON ob.id = b.order_id
                       WHERE date(ob.created_at) = ?1
                   ), 0) AS boatman_cost_cents,
                   COALESCE(SUM(o.price_cents), 0) AS sales_cents
            FROM orders o
            JOIN sales_documents d ON d.id = o.document_id
            WHERE date(o.created_at) = ?1
            "#,
        )
        .bind(&day_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Per-guide and per-boatman earnings over a half-open range
    /// `[from, to)`, sorted by earnings descending.
    pub async fn earnings_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<EarningsReport> {
        let guides: Vec<EarningsRow> = sqlx::query_as(
            r#"
            SELECT guide_name AS name,
                   COALESCE(SUM(guide_amount_cents), 0) AS earnings_cents,
                   COUNT(*) AS order_count
            FROM orders
            WHERE created_at >= ?1 AND created_at < ?2
            GROUP BY guide_name
            ORDER BY earnings_cents DESC, name
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let boatmen: Vec<EarningsRow> = sqlx::query_as(
            r#"
            SELECT b.name AS name,
                   COALESCE(SUM(b.cost_amount_cents), 0) AS earnings_cents,
                   COUNT(DISTINCT b.order_id) AS order_count
            FROM order_boatmen b
            JOIN orders o ON o.id = b.order_id
            WHERE o.created_at >= ?1 AND o.created_at < ?2
            GROUP BY b.name
            ORDER BY earnings_cents DESC, name
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        #[derive(FromRow)]
        struct SummaryRow {
            total_sales_cents: i64,
            order_count: i64,
        }

        let summary: SummaryRow = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(price_cents), 0) AS total_sales_cents,
                   COUNT(*) AS order_count
            FROM orders
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        let total_guide_cents = guides.iter().map(|g| g.earnings_cents).sum();
        let total_boatman_cents = boatmen.iter().map(|b| b.earnings_cents).sum();

        Ok(EarningsReport {
            guides,
            boatmen,
            total_guide_cents,
            total_boatman_cents,
            total_sales_cents: summary.total_sales_cents,
            order_count: summary.order_count,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::sales::{generate_document_id, generate_order_id};
    use chrono::{Datelike, Duration};
    use lagoon_core::{
        BoatmanShare, CompanySplit, DiscountSplit, GuideSplit, Order, SalesDocument,
    };

    fn order(guide: &str, boatman: &str, price: i64, guide_amount: i64, boat_amount: i64) -> Order {
        Order {
            id: generate_order_id(),
            order_code: "ORD".to_string(),
            guide: GuideSplit {
                name: guide.to_string(),
                rate_bps: 1500,
                amount_cents: guide_amount,
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
                name: boatman.to_string(),
                rate_bps: 800,
                cost_amount_cents: boat_amount,
            }],
            lines: vec![],
            price_cents: price,
            item_wise_total_cents: price,
            category_code: "DIVE".to_string(),
            exotic: false,
            less_cents: 0,
            gift_cents: 0,
            demonstrator_name: "Ruwan".to_string(),
            created_at: Utc::now(),
        }
    }

    async fn seed_group(db: &Database, group: &str, orders: Vec<Order>) {
        let now = Utc::now();
        let doc = SalesDocument {
            id: generate_document_id(),
            group_code: group.to_string(),
            orders,
            created_at: now,
            updated_at: now,
        };
        let mut tx = db.begin().await.unwrap();
        db.sales().insert_document(&mut tx, &doc).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_monthly_revenue_fills_empty_months() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_group(&db, "G-1", vec![order("Nimal", "Sunil", 10_000, 1500, 800)]).await;

        let now = Utc::now();
        let months = db.reports().monthly_revenue(now.year()).await.unwrap();
        assert_eq!(months.len(), 12);

        let this_month = &months[now.month() as usize - 1];
        assert_eq!(this_month.income_cents, 10_000);
        assert_eq!(this_month.order_count, 1);

        let total_orders: i64 = months.iter().map(|m| m.order_count).sum();
        assert_eq!(total_orders, 1);
    }

    #[tokio::test]
    async fn test_daily_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_group(
            &db,
            "G-1",
            vec![
                order("Nimal", "Sunil", 10_000, 1500, 800),
                order("Nimal", "Kamal", 5_000, 750, 400),
            ],
        )
        .await;
        seed_group(&db, "G-2", vec![order("Priya", "Sunil", 2_000, 300, 160)]).await;

        let totals = db
            .reports()
            .daily_totals(Utc::now().date_naive())
            .await
            .unwrap();
        assert_eq!(totals.group_count, 2);
        assert_eq!(totals.order_count, 3);
        assert_eq!(totals.sales_cents, 17_000);
        assert_eq!(totals.guide_cost_cents, 2550);
        assert_eq!(totals.boatman_cost_cents, 1360);

        // A day with no orders reports zeros, not an error
        let yesterday = (Utc::now() - Duration::days(1)).date_naive();
        let empty = db.reports().daily_totals(yesterday).await.unwrap();
        assert_eq!(empty.order_count, 0);
        assert_eq!(empty.sales_cents, 0);
    }

    #[tokio::test]
    async fn test_earnings_by_date_range_sorted_with_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_group(
            &db,
            "G-1",
            vec![
                order("Nimal", "Sunil", 10_000, 1500, 800),
                order("Priya", "Sunil", 20_000, 3000, 1600),
            ],
        )
        .await;

        let from = Utc::now() - Duration::hours(1);
        let to = Utc::now() + Duration::hours(1);
        let report = db.reports().earnings_by_date_range(from, to).await.unwrap();

        assert_eq!(report.guides.len(), 2);
        assert_eq!(report.guides[0].name, "Priya"); // highest earner first
        assert_eq!(report.guides[0].earnings_cents, 3000);

        assert_eq!(report.boatmen.len(), 1);
        assert_eq!(report.boatmen[0].earnings_cents, 2400);
        assert_eq!(report.boatmen[0].order_count, 2);

        assert_eq!(report.total_guide_cents, 4500);
        assert_eq!(report.total_boatman_cents, 2400);
        assert_eq!(report.total_sales_cents, 30_000);
        assert_eq!(report.order_count, 2);

        // Range entirely in the past is empty
        let past = db
            .reports()
            .earnings_by_date_range(from - Duration::days(2), from - Duration::days(1))
            .await
            .unwrap();
        assert!(past.guides.is_empty());
        assert_eq!(past.order_count, 0);
    }
}
