//! Attendance Model
//!
//! 每个员工每个自然日至多一条记录，重复打卡为原记录更新。

use super::serde_helpers;
use super::staff::Staff;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Attendance record entity (考勤)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Calendar day (Y-m-d) — upsert key together with `staff`
    pub date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Staff reference
    #[serde(with = "serde_helpers::record_id")]
    pub staff: RecordId,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
}

/// Mark-attendance payload (create-or-update keyed by staff + day)
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceMark {
    pub date: String,
    pub status: String,
    pub remarks: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub staff: RecordId,
}

/// Attendance joined with its staff record
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithStaff {
    #[serde(flatten)]
    pub attendance: Attendance,
    #[serde(rename = "staffData", skip_serializing_if = "Option::is_none")]
    pub staff_data: Option<Staff>,
}
