//! # Settlement Engine
//!
//! The four settlement operations, each a short synchronous
//! request/response call with one clear transaction boundary.
//!
//! ## Transaction Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  create_order     BEGIN → decrement line 1 → ... → decrement       │
//! │                   line N → insert document → COMMIT                 │
//! │                   Any failure rolls back every decrement: an        │
//! │                   order is all-or-nothing across its lines.         │
//! │                                                                     │
//! │  recalculate      lock(group) → load group → pure math →           │
//! │                   BEGIN → update all orders → COMMIT                │
//! │                                                                     │
//! │  reduce_price     lock(group) → load group → first match →         │
//! │                   BEGIN → update one order → COMMIT                 │
//! │                                                                     │
//! │  receive_stock    BEGIN → insert receipt → increment stock →       │
//! │                   COMMIT                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use lagoon_core::{
    apply_commissions, redistribute, validation, Caller, CoreError, Money, Order, OrderLine,
    ReceivedStock, RecalculateRequest, SalesDocument,
};
use lagoon_db::Database;

use crate::error::{EngineError, EngineResult};
use crate::lock::GroupLocks;
use crate::requests::{
    CreateOrderRequest, PriceReduction, ReceiveStockRequest, RecalculationOutcome,
};

/// The order settlement engine.
///
/// Cheap to clone; clones share the connection pool and the per-group
/// lock map.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    db: Database,
    locks: Arc<GroupLocks>,
}

impl SettlementEngine {
    /// Creates a settlement engine on top of a database handle.
    pub fn new(db: Database) -> Self {
        SettlementEngine {
            db,
            locks: Arc::new(GroupLocks::new()),
        }
    }

    /// The underlying database handle (repositories, reports).
    pub fn db(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Order Creation (stock-commit path)
    // =========================================================================

    /// Validates and commits a new sales order against live inventory.
    ///
    /// Every line is decremented through a conditional UPDATE inside one
    /// transaction. The first line that cannot be satisfied aborts the
    /// whole call; the rollback restores every earlier line's stock, so
    /// a rejected order never leaves stock decremented.
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
        caller: &Caller,
    ) -> EngineResult<SalesDocument> {
        debug!(
            group_code = %request.group_code,
            order_code = %request.order_code,
            lines = request.lines.len(),
            caller = %caller.id,
            "create_order"
        );

        validation::validate_group_code(&request.group_code)?;
        validation::validate_order_code(&request.order_code)?;
        validation::validate_demonstrator_name(&request.demonstrator_name)?;
        validation::validate_price_cents(request.price_cents)?;

        let requested_lines: Vec<OrderLine> = request
            .lines
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id.clone(),
                product_name: String::new(),
                quantity: line.quantity,
            })
            .collect();
        validation::validate_order_lines(&requested_lines)?;

        if request.less_cents < 0 || request.gift_cents < 0 {
            return Err(EngineError::InvalidInput(
                "less and gift must not be negative".to_string(),
            ));
        }

        let products = self.db.products();
        let mut tx = self.db.begin().await.map_err(EngineError::from)?;

        // Decrement every line before anything is persisted. Product
        // names are resolved here so the order snapshots them at sale
        // time.
        let mut lines = Vec::with_capacity(requested_lines.len());
        for line in requested_lines {
            let product = products
                .get_in_tx(&mut tx, &line.product_id)
                .await?
                .filter(|p| p.is_active)
                .ok_or_else(|| {
                    EngineError::from(CoreError::ProductNotFound(line.product_id.clone()))
                })?;

            let decremented = products
                .decrement_stock(&mut tx, &product.id, line.quantity)
                .await?;
            if !decremented {
                // Transaction drops here, rolling back earlier lines.
                return Err(EngineError::OutOfStock {
                    item: product.item_name,
                    available: product.stock,
                    requested: line.quantity,
                });
            }

            lines.push(OrderLine {
                product_id: line.product_id,
                product_name: product.item_name,
                quantity: line.quantity,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_code: request.order_code,
            guide: request.guide,
            company: request.company,
            discount: request.discount,
            boatmen: request.boatmen,
            lines,
            price_cents: request.price_cents,
            item_wise_total_cents: request.item_wise_total_cents,
            category_code: request.category_code,
            exotic: request.exotic,
            less_cents: request.less_cents,
            gift_cents: request.gift_cents,
            demonstrator_name: request.demonstrator_name,
            created_at: now,
        };
        let document = SalesDocument {
            id: Uuid::new_v4().to_string(),
            group_code: request.group_code,
            orders: vec![order],
            created_at: now,
            updated_at: now,
        };

        self.db.sales().insert_document(&mut tx, &document).await?;
        tx.commit().await.map_err(|e| {
            error!(group_code = %document.group_code, error = %e, "Order commit failed");
            EngineError::Database(e.into())
        })?;

        info!(
            group_code = %document.group_code,
            document_id = %document.id,
            "Order committed"
        );
        Ok(document)
    }

    // =========================================================================
    // Commission Recalculation + Pool Redistribution
    // =========================================================================

    /// Recomputes commission splits and redistributes the `less` and
    /// `gift` pools across every order of the group.
    ///
    /// Loads every document sharing the group code (a group may be split
    /// across documents), runs the pure math from lagoon-core, and saves
    /// all modified orders in one transaction. The whole operation holds
    /// the group's lock so two recalculations cannot interleave.
    pub async fn recalculate(
        &self,
        group_code: &str,
        request: &RecalculateRequest,
    ) -> EngineResult<RecalculationOutcome> {
        debug!(group_code = %group_code, "recalculate");

        validation::validate_group_code(group_code)?;

        let lock = self.locks.for_group(group_code).await;
        let _guard = lock.lock().await;

        let mut documents = self.db.sales().find_by_group_code(group_code).await?;
        if documents.is_empty() {
            return Err(CoreError::GroupNotFound(group_code.to_string()).into());
        }

        // Original pool shares in document order; list order decides
        // which order absorbs the rounding residual.
        let less_shares: Vec<Money> = documents
            .iter()
            .flat_map(|d| d.orders.iter())
            .map(|o| Money::from_cents(o.less_cents))
            .collect();
        let gift_shares: Vec<Money> = documents
            .iter()
            .flat_map(|d| d.orders.iter())
            .map(|o| Money::from_cents(o.gift_cents))
            .collect();

        let less = redistribute(&less_shares, request.total_less_deduction());
        let gift = redistribute(&gift_shares, request.total_gift_deduction());

        let mut guide_total = Money::zero();
        let mut boatman_total = Money::zero();
        let mut orders_updated = 0usize;
        for (index, order) in documents
            .iter_mut()
            .flat_map(|d| d.orders.iter_mut())
            .enumerate()
        {
            let outcome = apply_commissions(order, request);
            guide_total += outcome.guide_amount;
            boatman_total += outcome.boatman_payout;

            order.less_cents = less.shares[index].cents();
            order.gift_cents = gift.shares[index].cents();
            orders_updated += 1;
        }

        let sales = self.db.sales();
        let mut tx = self.db.begin().await.map_err(EngineError::from)?;
        for document in &documents {
            sales.update_orders(&mut tx, &document.orders).await?;
        }
        sales.touch_group(&mut tx, group_code).await?;
        tx.commit().await.map_err(|e| {
            error!(group_code = %group_code, error = %e, "Recalculation commit failed");
            EngineError::Database(e.into())
        })?;

        info!(
            group_code = %group_code,
            orders = orders_updated,
            remaining_less = less.remaining.cents(),
            remaining_gift = gift.remaining.cents(),
            "Recalculation committed"
        );

        Ok(RecalculationOutcome {
            documents,
            original_less_cents: less.current_total.cents(),
            remaining_less_cents: less.remaining.cents(),
            original_gift_cents: gift.current_total.cents(),
            remaining_gift_cents: gift.remaining.cents(),
            guide_total_cents: guide_total.cents(),
            boatman_total_cents: boatman_total.cents(),
            orders_updated,
        })
    }

    // =========================================================================
    // Price Reduction
    // =========================================================================

    /// Reduces the price of one order, floored at zero.
    ///
    /// Order codes are assumed unique within a group but not enforced at
    /// write time; the first match in document order wins.
    pub async fn reduce_price(
        &self,
        group_code: &str,
        order_code: &str,
        amount_cents: i64,
    ) -> EngineResult<PriceReduction> {
        debug!(group_code = %group_code, order_code = %order_code, amount_cents, "reduce_price");

        validation::validate_group_code(group_code)?;
        validation::validate_order_code(order_code)?;
        validation::validate_reduction_amount(Money::from_cents(amount_cents))
            .map_err(|e| EngineError::InvalidInput(e.to_string()))?;

        let lock = self.locks.for_group(group_code).await;
        let _guard = lock.lock().await;

        let documents = self.db.sales().find_by_group_code(group_code).await?;
        if documents.is_empty() {
            return Err(CoreError::GroupNotFound(group_code.to_string()).into());
        }

        let found = documents.into_iter().find_map(|document| {
            document
                .orders
                .iter()
                .position(|o| o.order_code == order_code)
                .map(|index| (document, index))
        });
        let (document, index) = found.ok_or_else(|| {
            EngineError::from(CoreError::OrderNotFound {
                group_code: group_code.to_string(),
                order_code: order_code.to_string(),
            })
        })?;

        let mut order = document.orders[index].clone();
        let previous_price_cents = order.price_cents;
        order.price_cents = (previous_price_cents - amount_cents).max(0);

        let mut tx = self.db.begin().await.map_err(EngineError::from)?;
        self.db
            .sales()
            .update_order_price(&mut tx, &document.id, &order.id, order.price_cents)
            .await?;
        tx.commit().await.map_err(|e| {
            error!(group_code = %group_code, order_code = %order_code, error = %e, "Price reduction commit failed");
            EngineError::Database(e.into())
        })?;

        info!(
            group_code = %group_code,
            order_code = %order_code,
            previous = previous_price_cents,
            new = order.price_cents,
            "Price reduction committed"
        );

        Ok(PriceReduction {
            group_code: group_code.to_string(),
            document_id: document.id,
            previous_price_cents,
            new_price_cents: order.price_cents,
            order,
        })
    }

    // =========================================================================
    // Stock Receipt
    // =========================================================================

    /// Records a stock receipt and increments the product's stock in the
    /// same transaction.
    pub async fn receive_stock(
        &self,
        request: ReceiveStockRequest,
        caller: &Caller,
    ) -> EngineResult<ReceivedStock> {
        debug!(product_id = %request.product_id, qty = request.qty, "receive_stock");

        if request.product_id.trim().is_empty() {
            return Err(lagoon_core::ValidationError::Required {
                field: "product_id".to_string(),
            }
            .into());
        }
        if request.qty <= 0 {
            return Err(lagoon_core::ValidationError::MustBePositive {
                field: "qty".to_string(),
            }
            .into());
        }

        let product = self
            .db
            .products()
            .get_by_id(&request.product_id)
            .await?
            .ok_or_else(|| EngineError::from(CoreError::ProductNotFound(request.product_id.clone())))?;

        let now = Utc::now();
        let record = ReceivedStock {
            id: Uuid::new_v4().to_string(),
            received_product_id: product.id.clone(),
            received_product_name: product.item_name.clone(),
            category: product.category_code.clone(),
            qty: request.qty,
            remark: request.remark,
            created_by: caller.display_name.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.db.begin().await.map_err(EngineError::from)?;
        self.db
            .received_stocks()
            .insert(&mut tx, &record)
            .await?;
        self.db
            .products()
            .increment_stock(&mut tx, &product.id, request.qty)
            .await?;
        tx.commit().await.map_err(|e| {
            error!(product_id = %product.id, error = %e, "Stock receipt commit failed");
            EngineError::Database(e.into())
        })?;

        info!(
            product_id = %product.id,
            qty = request.qty,
            "Stock receipt committed"
        );
        Ok(record)
    }
}
