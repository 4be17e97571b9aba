//! Reservation Model

use super::dining_table::TableView;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation status enumeration (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

/// Reservation payment method enumeration (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationPaymentMethod {
    #[serde(rename = "cash on delivery")]
    CashOnDelivery,
    #[serde(rename = "online transfer")]
    OnlineTransfer,
    #[serde(rename = "card")]
    Card,
    #[serde(rename = "no advance payment")]
    NoAdvancePayment,
}

/// Embedded reservation customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCustomer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Embedded reservation payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationPayment {
    pub payment_method: ReservationPaymentMethod,
    pub payment_status: String,
    pub payment_amount: f64,
}

/// Reservation entity (订座)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Table reference
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub max_persons: i32,
    /// Reservation day (Y-m-d)
    pub date: String,
    /// Reservation time ("HH:MM")
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_fee: Option<f64>,
    pub status: ReservationStatus,
    pub customer: ReservationCustomer,
    pub payment: ReservationPayment,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create reservation payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub max_persons: i32,
    pub date: String,
    pub time: String,
    pub advance_fee: Option<f64>,
    pub status: ReservationStatus,
    pub customer: ReservationCustomer,
    pub payment: ReservationPayment,
}

/// Update reservation payload (partial merge)
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationUpdate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub table: Option<RecordId>,
    pub max_persons: Option<i32>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub advance_fee: Option<f64>,
    pub status: Option<ReservationStatus>,
    pub customer: Option<ReservationCustomer>,
    pub payment: Option<ReservationPayment>,
}

/// Reservation joined with its table view
#[derive(Debug, Clone, Serialize)]
pub struct ReservationWithTable {
    #[serde(flatten)]
    pub reservation: Reservation,
    #[serde(rename = "tableData", skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableView>,
}
