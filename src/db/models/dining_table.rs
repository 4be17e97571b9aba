//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Table status enumeration (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "not available")]
    NotAvailable,
}

/// Dining table entity (桌台)
///
/// (number, floor) 在未删除桌台中唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub number: i32,
    pub floor: i32,
    pub capacity: i32,
    pub status: TableStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableCreate {
    pub number: i32,
    pub floor: i32,
    pub capacity: i32,
    pub status: TableStatus,
}

/// Update dining table payload (partial merge)
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableUpdate {
    pub number: Option<i32>,
    pub floor: Option<i32>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
}

/// Denormalized table view joined onto orders/reservations (read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub number: i32,
    pub floor: i32,
    pub capacity: i32,
    pub status: TableStatus,
}

impl From<DiningTable> for TableView {
    fn from(t: DiningTable) -> Self {
        Self {
            id: t.id,
            number: t.number,
            floor: t.floor,
            capacity: t.capacity,
            status: t.status,
        }
    }
}
