//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate, ReservationWithTable};
use crate::db::repository::ReservationRepository;
use crate::utils::time;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_min_int, validate_non_negative,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    /// Calendar day (Y-m-d), required
    pub date: Option<String>,
}

/// GET /api/reservations?date= - 获取某日订座 (桌台联查)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<ApiResponse<Vec<ReservationWithTable>>> {
    let date = query
        .date
        .ok_or_else(|| AppError::validation("date query parameter is required"))?;

    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_by_date(&date).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Reservations fetched successfully",
        reservations,
    ))
}

/// 订座总数统计
#[derive(Debug, Serialize)]
pub struct ReservationCount {
    #[serde(rename = "totalReservations")]
    pub total_reservations: u64,
}

/// GET /api/reservations/count - 今日订座数
pub async fn count(State(state): State<ServerState>) -> AppResult<ApiResponse<ReservationCount>> {
    let today = time::day_key(time::today(state.config.timezone));
    let repo = ReservationRepository::new(state.db.clone());
    let total_reservations = repo.count_by_date(&today).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Reservation count fetched successfully",
        ReservationCount { total_reservations },
    ))
}

/// GET /api/reservations/:id - 获取单个订座
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;
    Ok(ApiResponse::ok(
        "Reservation fetched successfully",
        reservation,
    ))
}

/// POST /api/reservations - 创建订座
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<ApiResponse<Reservation>> {
    validate_required_text(&payload.date, "date", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.time, "time", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.customer.name, "customer.name", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer.phone, "customer.phone", MAX_SHORT_TEXT_LEN)?;
    validate_min_int(payload.max_persons as i64, 1, "maxPersons")?;
    validate_non_negative(payload.payment.payment_amount, "payment.paymentAmount")?;
    if let Some(fee) = payload.advance_fee {
        validate_non_negative(fee, "advanceFee")?;
    }

    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created(
        "Reservation created successfully",
        reservation,
    ))
}

/// PUT /api/reservations/:id - 更新订座 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<ApiResponse<Reservation>> {
    if let Some(max_persons) = payload.max_persons {
        validate_min_int(max_persons as i64, 1, "maxPersons")?;
    }
    if let Some(fee) = payload.advance_fee {
        validate_non_negative(fee, "advanceFee")?;
    }
    if let Some(payment) = &payload.payment {
        validate_non_negative(payment.payment_amount, "payment.paymentAmount")?;
    }

    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Reservation updated successfully",
        reservation,
    ))
}
