//! Attendance API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Attendance, AttendanceMark, AttendanceWithStaff};
use crate::db::repository::AttendanceRepository;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AttendanceListQuery {
    /// Optional calendar-day filter (Y-m-d)
    pub date: Option<String>,
}

/// GET /api/attendance?date= - 获取考勤记录 (员工信息联查)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AttendanceListQuery>,
) -> AppResult<ApiResponse<Vec<AttendanceWithStaff>>> {
    let repo = AttendanceRepository::new(state.db.clone());
    let records = match query.date.as_deref() {
        Some(date) => repo.find_by_date(date).await,
        None => repo.find_all().await,
    }
    .map_err(AppError::from)?;
    Ok(ApiResponse::ok("Attendance fetched successfully", records))
}

/// POST /api/attendance - 打卡 (同员工同日重复提交为更新)
pub async fn mark(
    State(state): State<ServerState>,
    Json(payload): Json<AttendanceMark>,
) -> AppResult<ApiResponse<Attendance>> {
    validate_required_text(&payload.date, "date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.status, "status", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.remarks, "remarks", MAX_NOTE_LEN)?;

    let repo = AttendanceRepository::new(state.db.clone());
    let record = repo.mark(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Attendance marked successfully", record))
}
