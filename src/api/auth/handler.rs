//! Auth API Handlers

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::models::{UserView, UserRole};
use crate::db::repository::UserRepository;
use crate::utils::{ApiResponse, AppError, AppResult};

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录结果
#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserView,
}

/// POST /api/auth/login - 登录换取令牌
///
/// 未知邮箱与密码错误返回同一个 401 提示，避免枚举已注册邮箱。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResult>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|rid| rid.to_string())
        .ok_or_else(|| AppError::internal("User record has no id"))?;
    let token = state
        .jwt
        .generate_token(&user_id, &user.email, user.role)?;

    tracing::info!(email = %user.email, "User logged in");

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResult {
            token,
            user: UserView::from(user),
        },
    ))
}

/// 当前用户信息 (从令牌 claims 投影)
#[derive(Debug, Serialize)]
pub struct MeResult {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

/// GET /api/auth/me - 当前登录用户
pub async fn me(Extension(user): Extension<CurrentUser>) -> ApiResponse<MeResult> {
    ApiResponse::ok(
        "Current user",
        MeResult {
            id: user.id,
            email: user.email,
            role: user.role,
        },
    )
}
