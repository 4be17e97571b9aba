//! Order Repository
//!
//! 订单号来自 `counter:order_number` 的原子自增，保证并发下单时
//! 全局单调且不重号。

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{
    DiningTable, Order, OrderCreate, OrderItem, OrderPay, OrderStatus, OrderWithTable, Product,
    ProductSnapshot, TableView,
};
use crate::utils::time;
use std::collections::{HashMap, HashSet};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

/// Row shape of the atomic counter record
#[derive(Debug, serde::Deserialize)]
struct CounterRow {
    value: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paginated listing with the table joined on, newest first.
    ///
    /// Returns `(rows, total)` where `total` counts all non-deleted orders.
    pub async fn find_page(&self, page: u32, limit: u32) -> RepoResult<(Vec<OrderWithTable>, u64)> {
        let start = (page - 1) * limit;
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $start",
            )
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?
            .take(0)?;

        let total = self.count().await?;
        let rows = self.attach_tables(orders).await?;
        Ok((rows, total))
    }

    /// Total number of non-deleted orders
    pub async fn count(&self) -> RepoResult<u64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM order WHERE is_deleted = false GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Find a live order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_record_id(id, "order")?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order.filter(|o| !o.is_deleted))
    }

    /// Create an order, freezing a product snapshot onto every line
    pub async fn create(
        &self,
        data: OrderCreate,
        products: &HashMap<String, Product>,
    ) -> RepoResult<Order> {
        self.assert_table_exists(&data.table.to_string()).await?;

        let mut items = Vec::with_capacity(data.products.len());
        for line in &data.products {
            if line.quantity < 1 {
                return Err(RepoError::Validation(
                    "Quantity must be at least 1".to_string(),
                ));
            }
            let product = products
                .get(&line.product.to_string())
                .ok_or_else(|| {
                    RepoError::NotFound("One or more products not found".to_string())
                })?;
            items.push(OrderItem {
                product: line.product.clone(),
                quantity: line.quantity,
                product_snapshot: Some(ProductSnapshot {
                    name: product.name.clone(),
                    description: product.description.clone(),
                    image: product.image.clone(),
                    product_number: product.product_number.clone(),
                    price: product.price,
                    menu: Some(product.menu.clone()),
                }),
            });
        }
        if items.is_empty() {
            return Err(RepoError::Validation(
                "Order must contain at least one product".to_string(),
            ));
        }

        let order_number = self.next_order_number().await?;
        let now = time::now_millis();
        let order = Order {
            id: None,
            order_number,
            table: data.table,
            products: items,
            price: 0.0,
            tax: 0.0,
            total_price: 0.0,
            customer: data.customer,
            status: OrderStatus::InProcess,
            payment_method: None,
            tip: 0.0,
            date: now,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Guarded status transition — terminal states never move again
    pub async fn update_status(&self, id: &str, to: OrderStatus) -> RepoResult<Order> {
        let rid = parse_record_id(id, "order")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Order not found".to_string()))?;

        if !existing.status.can_transition_to(to) {
            return Err(RepoError::Validation(format!(
                "Cannot change order status from '{}' to '{}'",
                existing.status.as_str(),
                to.as_str()
            )));
        }
        if existing.status == to {
            return Ok(existing);
        }

        existing.status = to;
        existing.updated_at = time::now_millis();
        // rid is the update target; a "table:id" string in the payload is rejected
        existing.id = None;
        let updated: Option<Order> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    /// Record payment details — money fields only, status untouched
    pub async fn pay(&self, id: &str, data: OrderPay) -> RepoResult<Order> {
        let rid = parse_record_id(id, "order")?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Order not found".to_string()))?;

        existing.price = data.price;
        existing.tax = data.tax;
        existing.total_price = data.total_price;
        existing.payment_method = Some(data.payment_method);
        existing.tip = data.tip.unwrap_or(0.0);
        existing.date = data.date;
        existing.updated_at = time::now_millis();
        existing.id = None;

        let updated: Option<Order> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    /// Soft-delete a batch of orders, returning how many were flagged
    pub async fn delete_many(&self, ids: &[String]) -> RepoResult<u64> {
        let mut deleted = 0u64;
        for id in ids {
            let rid = parse_record_id(id, "order")?;
            let existing: Option<Order> = self.base.db().select(rid.clone()).await?;
            if let Some(mut order) = existing.filter(|o| !o.is_deleted) {
                order.is_deleted = true;
                order.updated_at = time::now_millis();
                order.id = None;
                let _: Option<Order> = self.base.db().update(rid).content(order).await?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    // ---------------------------------------------------------------
    // Aggregation queries (dashboard / charts)
    // ---------------------------------------------------------------

    /// Sum of `total_price` over completed orders whose business date
    /// falls in `[start, end)`. Empty ranges sum to zero.
    pub async fn sum_completed_revenue(&self, start: i64, end: i64) -> RepoResult<f64> {
        let row: Option<SumRow> = self
            .base
            .db()
            .query(
                "SELECT math::sum(total_price) AS total FROM order \
                 WHERE is_deleted = false AND status = 'completed' \
                 AND date >= $start AND date < $end GROUP ALL",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0.0))
    }

    /// Number of completed orders with business date in `[start, end)`
    pub async fn count_completed(&self, start: i64, end: i64) -> RepoResult<u64> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() FROM order \
                 WHERE is_deleted = false AND status = 'completed' \
                 AND date >= $start AND date < $end GROUP ALL",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Completed orders with business date in `[start, end)` (chart folding)
    pub async fn find_completed_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order \
                 WHERE is_deleted = false AND status = 'completed' \
                 AND date >= $start AND date < $end ORDER BY date ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Distinct tables currently holding an in-process order
    pub async fn occupied_table_ids(&self) -> RepoResult<HashSet<String>> {
        let ids: Vec<String> = self
            .base
            .db()
            .query(
                "SELECT VALUE table FROM order \
                 WHERE is_deleted = false AND status = 'in process'",
            )
            .await?
            .take(0)?;
        Ok(ids.into_iter().collect())
    }

    /// Distinct tables with any order not yet completed (includes cancelled
    /// per the legacy floor-view semantics)
    pub async fn unsettled_table_ids(&self) -> RepoResult<HashSet<String>> {
        let ids: Vec<String> = self
            .base
            .db()
            .query(
                "SELECT VALUE table FROM order \
                 WHERE is_deleted = false AND status != 'completed'",
            )
            .await?
            .take(0)?;
        Ok(ids.into_iter().collect())
    }

    async fn next_order_number(&self) -> RepoResult<i64> {
        let row: Option<CounterRow> = self
            .base
            .db()
            .query("UPSERT counter:order_number SET value += 1 RETURN AFTER")
            .await?
            .take(0)?;
        row.map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Failed to allocate order number".to_string()))
    }

    async fn attach_tables(&self, orders: Vec<Order>) -> RepoResult<Vec<OrderWithTable>> {
        let mut cache: HashMap<String, TableView> = HashMap::new();
        let mut out = Vec::with_capacity(orders.len());
        for order in orders {
            let key = order.table.to_string();
            if !cache.contains_key(&key) {
                let table: Option<DiningTable> =
                    self.base.db().select(order.table.clone()).await?;
                if let Some(table) = table.filter(|t| !t.is_deleted) {
                    cache.insert(key.clone(), TableView::from(table));
                }
            }
            out.push(OrderWithTable {
                table_data: cache.get(&key).cloned(),
                order,
            });
        }
        Ok(out)
    }

    async fn assert_table_exists(&self, table_id: &str) -> RepoResult<()> {
        let rid = parse_record_id(table_id, "dining_table")?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        match table.filter(|t| !t.is_deleted) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound("Table not found".to_string())),
        }
    }
}

/// Row shape for `math::sum(...) AS total`
#[derive(Debug, serde::Deserialize)]
struct SumRow {
    total: f64,
}
