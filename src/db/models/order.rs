//! Order Model
//!
//! 订单持有下单时刻的商品快照 (`ProductSnapshot`)：之后商品的任何修改或
//! 删除都不影响历史订单的展示与营收统计。

use super::dining_table::TableView;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status state machine
///
/// ```text
/// in process ──→ completed
///      └───────→ cancelled
/// ```
///
/// completed / cancelled 为终态，不允许再迁移 (同值写入视为无操作)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "in process")]
    InProcess,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Whether the transition `self → to` is allowed
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        match (self, to) {
            (a, b) if a == b => true,
            (OrderStatus::InProcess, _) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::InProcess => "in process",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order payment method enumeration (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash on delivery")]
    CashOnDelivery,
    #[serde(rename = "online transfer")]
    OnlineTransfer,
    #[serde(rename = "card")]
    Card,
}

/// Embedded order customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
}

/// Immutable copy of product fields frozen at order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub description: String,
    pub image: String,
    pub product_number: String,
    pub price: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub menu: Option<RecordId>,
}

/// One order line: product reference + quantity + frozen snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_snapshot: Option<ProductSnapshot>,
}

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Monotonically increasing; assigned from the atomic store counter
    pub order_number: i64,
    /// Table reference
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub products: Vec<OrderItem>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total_price: f64,
    pub customer: Customer,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub tip: f64,
    /// Business date (Unix millis) — backfilled by payment, distinct from `created_at`
    pub date: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create order line payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub products: Vec<OrderItemCreate>,
    pub customer: Customer,
}

/// Status transition payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Payment payload — overwrites the money fields, never touches `status`
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPay {
    pub price: f64,
    pub tax: f64,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub tip: Option<f64>,
    /// Business date (Unix millis)
    pub date: i64,
}

/// Order joined with its table view (read-only sugar, not persisted)
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithTable {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "tableData", skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_process_can_complete_or_cancel() {
        assert!(OrderStatus::InProcess.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::InProcess.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_states_are_terminal() {
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::InProcess));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::InProcess));
    }

    #[test]
    fn same_state_write_is_a_noop() {
        assert!(OrderStatus::Completed.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn status_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProcess).unwrap(),
            "\"in process\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cash on delivery\""
        );
    }
}
