//! Staff Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Staff member entity (员工档案)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Date of birth (Y-m-d)
    pub dob: String,
    pub address: String,
    pub salary: f64,
    /// Shift times as "HH:MM"
    pub shift_start: String,
    pub shift_end: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Create staff payload
#[derive(Debug, Clone, Deserialize)]
pub struct StaffCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub address: String,
    pub salary: f64,
    pub shift_start: String,
    pub shift_end: String,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

/// Update staff payload (partial merge)
#[derive(Debug, Clone, Deserialize)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    pub salary: Option<f64>,
    pub shift_start: Option<String>,
    pub shift_end: Option<String>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}
